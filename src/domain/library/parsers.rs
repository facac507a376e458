//! Library Context - Text Parsers

use serde::Serialize;

/// 编号列表条目（收藏、播放列表、电台）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub number: u32,
    pub name: String,
}

/// 队列条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueItem {
    pub number: u32,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub is_current: bool,
}

/// soco-cli 的状态输出，不能当作列表条目
const STATUS_TOKENS: &[&str] = &[
    "on",
    "off",
    "stopped",
    "playing",
    "paused",
    "transitioning",
    "in progress",
    "shuffle",
    "repeat",
    "crossfade",
];

fn is_status_token(text: &str) -> bool {
    let lower = text.to_lowercase();
    STATUS_TOKENS.contains(&lower.as_str())
}

/// 解析 `N: name` 形式的编号列表
pub fn parse_numbered_list(output: Option<&str>) -> Vec<ListItem> {
    let Some(output) = output else {
        return Vec::new();
    };

    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_status_token(line))
        .filter_map(|line| {
            let (number, name) = line.split_once(':')?;
            let number = number.trim().parse::<u32>().ok()?;
            let name = name.trim();
            if name.is_empty() || is_status_token(name) {
                return None;
            }
            Some(ListItem {
                number,
                name: name.to_string(),
            })
        })
        .collect()
}

/// 解析队列输出
///
/// 每行形如 ` *> 3: Artist: X | Album: Y | Title: Z`，`*` 标记当前曲目。
/// 没有结构化字段时整行内容作为标题。
pub fn parse_queue_list(output: Option<&str>) -> Vec<QueueItem> {
    let Some(output) = output else {
        return Vec::new();
    };

    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(parse_queue_line)
        .collect()
}

fn parse_queue_line(line: &str) -> Option<QueueItem> {
    let is_current = line.contains('*');
    let cleaned = line.replace("*>", "").replace('*', "");
    let cleaned = cleaned.trim();

    let (number, content) = cleaned.split_once(':')?;
    let number = number.trim().parse::<u32>().ok()?;
    let content = content.trim();

    let mut artist = String::new();
    let mut album = String::new();
    let mut title = String::new();

    for part in content.split('|').map(str::trim) {
        if let Some(value) = strip_prefix_ignore_case(part, "artist:") {
            artist = value.trim().to_string();
        } else if let Some(value) = strip_prefix_ignore_case(part, "album:") {
            album = value.trim().to_string();
        } else if let Some(value) = strip_prefix_ignore_case(part, "title:") {
            title = value.trim().to_string();
        }
    }

    if title.is_empty() && artist.is_empty() {
        title = content.to_string();
    }

    Some(QueueItem {
        number,
        title,
        artist,
        album,
        is_current,
    })
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbered_list() {
        let output = "  1: Jazz FM\n2: BBC Radio 4\n\nnot a line\n3: playing\n";
        let items = parse_numbered_list(Some(output));
        assert_eq!(
            items,
            vec![
                ListItem { number: 1, name: "Jazz FM".into() },
                ListItem { number: 2, name: "BBC Radio 4".into() },
            ]
        );
    }

    #[test]
    fn test_parse_numbered_list_skips_status_output() {
        assert!(parse_numbered_list(Some("off")).is_empty());
        assert!(parse_numbered_list(None).is_empty());
    }

    #[test]
    fn test_parse_queue_structured() {
        let output = "  1: Artist: Miles Davis | Album: Kind of Blue | Title: So What\n\
                      *> 2: Artist: John Coltrane | Album: Giant Steps | Title: Naima\n";
        let items = parse_queue_list(Some(output));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "So What");
        assert_eq!(items[0].album, "Kind of Blue");
        assert!(!items[0].is_current);
        assert_eq!(items[1].number, 2);
        assert_eq!(items[1].artist, "John Coltrane");
        assert!(items[1].is_current);
    }

    #[test]
    fn test_parse_queue_unstructured_uses_title() {
        let items = parse_queue_list(Some("7: Some Radio Stream\nbogus"));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Some Radio Stream");
        assert!(items[0].artist.is_empty());
    }
}
