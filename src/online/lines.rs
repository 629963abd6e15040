use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Parse a `Key: Value` per line reply.
///
/// Blank lines are skipped and both sides are trimmed. Values may contain
/// further colons (timestamps), only the first one separates the key. A
/// non-blank line without a separator or with an empty key fails the whole
/// reply.
pub fn parse(text: &str) -> Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            return Err(Error::Mapping(format!(
                "line {} is not a `Key: Value` pair",
                number + 1
            )));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::Mapping(format!("line {} has an empty key", number + 1)));
        }
        map.insert(key.to_string(), value.trim().to_string());
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs() {
        let map = parse("StatCode: 00\nTranID: T1\n").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["StatCode"], "00");
        assert_eq!(map["TranID"], "T1");
    }

    #[test]
    fn ignores_blank_lines_and_whitespace() {
        let map = parse("\r\n  StatCode :  00  \r\n\r\n\tAmount:5.00\r\n   \n").unwrap();
        assert_eq!(map["StatCode"], "00");
        assert_eq!(map["Amount"], "5.00");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn splits_on_first_colon_only() {
        let map = parse("PaidDate: 2022-01-01 16:00:00").unwrap();
        assert_eq!(map["PaidDate"], "2022-01-01 16:00:00");
    }

    #[test]
    fn empty_value_is_kept() {
        let map = parse("ErrorCode:\nErrorDesc: ").unwrap();
        assert_eq!(map["ErrorCode"], "");
        assert_eq!(map["ErrorDesc"], "");
    }

    #[test]
    fn rejects_line_without_colon() {
        let err = parse("StatCode: 00\n<html>Error</html>\n").unwrap_err();
        assert!(matches!(err, Error::Mapping(msg) if msg.contains("line 2")));
    }

    #[test]
    fn rejects_empty_key() {
        assert!(matches!(parse(": 00"), Err(Error::Mapping(_))));
    }
}
