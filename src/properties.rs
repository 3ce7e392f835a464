/// properties 文件行模型
///
/// 只做 `key=value` 的行级拆分，不处理转义、多行值或引号。

/// 行类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyLine<'a> {
    /// 空行（去空白后为空）
    Blank,
    /// 注释行（以 `#` 或 `!` 开头）
    Comment,
    /// 键值行，键为第一个 `=` 之前的内容（无 `=` 时为整行）
    Entry { key: &'a str },
}

impl<'a> PropertyLine<'a> {
    /// 对一行文本分类
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return PropertyLine::Blank;
        }
        if trimmed.starts_with('#') || trimmed.starts_with('!') {
            return PropertyLine::Comment;
        }

        let key = trimmed.split('=').next().unwrap_or(trimmed).trim();
        PropertyLine::Entry { key }
    }

    /// 键值行的键
    pub fn key(&self) -> Option<&'a str> {
        match self {
            PropertyLine::Entry { key } => Some(key),
            _ => None,
        }
    }
}

/// 生成 `key=value` 行
pub fn format_entry(key: &str, value: &str) -> String {
    format!("{}={}", key, value)
}

/// 判断文件内容是否为空（只含空白）
pub fn is_blank_content(content: &str) -> bool {
    content.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(PropertyLine::classify(""), PropertyLine::Blank);
        assert_eq!(PropertyLine::classify("   \r"), PropertyLine::Blank);
        assert_eq!(PropertyLine::classify("# comment"), PropertyLine::Comment);
        assert_eq!(PropertyLine::classify("  ! legacy comment"), PropertyLine::Comment);
        assert_eq!(PropertyLine::classify("A=1").key(), Some("A"));
        assert_eq!(PropertyLine::classify("  B = two \r").key(), Some("B"));
    }

    #[test]
    fn test_classify_unusual_entries() {
        // 多个 `=` 时取第一个之前的部分
        assert_eq!(PropertyLine::classify("URL=http://x?a=b").key(), Some("URL"));
        // 无 `=` 时整行即键
        assert_eq!(PropertyLine::classify("dangling").key(), Some("dangling"));
        assert_eq!(PropertyLine::classify("# A=1").key(), None);
    }

    #[test]
    fn test_format_and_blank() {
        assert_eq!(format_entry("GREETING", "Hello"), "GREETING=Hello");
        assert!(is_blank_content(" \n\n\t"));
        assert!(!is_blank_content("\n# only a comment\n"));
    }
}
