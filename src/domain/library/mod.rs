//! Library Context - 收藏 / 播放列表 / 队列
//!
//! soco-cli 以纯文本列表返回收藏、播放列表、电台与队列，
//! 这里负责把这些文本解析为结构化条目。

mod parsers;

pub use parsers::{parse_numbered_list, parse_queue_list, ListItem, QueueItem};
