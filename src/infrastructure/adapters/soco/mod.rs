//! soco-cli Adapter - 命令网关实现

mod envelope;
mod gate;
mod http_command_client;
mod scripted_commands;

pub use envelope::{parse_command_envelope, parse_name_list, EnvelopeError};
pub use gate::{RequestGate, RequestPermit};
pub use http_command_client::{
    command_url, HttpCommandClientConfig, HttpSpeakerCommandClient, TRANSPORT_FAILURE,
};
pub use scripted_commands::{Reply, ScriptedSpeakerCommands};
