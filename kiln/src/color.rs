use fnv::FnvHashMap;

use crate::error::KilnError;

/// Memoizes the operand text of `#RRGGBB` colors.
#[derive(Debug, Clone, Default)]
pub struct ColorCache {
    operands: FnvHashMap<String, String>,
    decodes: usize,
}

fn parse_hex(color: &str) -> Result<[u8; 3], KilnError> {
    let digits = color
        .strip_prefix('#')
        .ok_or_else(|| KilnError::InvalidColor(color.to_owned()))?;
    let mut rgb = [0u8; 3];
    hex::decode_to_slice(digits, &mut rgb).map_err(|_| KilnError::InvalidColor(color.to_owned()))?;
    Ok(rgb)
}

impl ColorCache {
    /// Operand text ` r g b` for a color, each channel as byte / 255.
    /// The empty color has empty operands.
    pub fn operands(&mut self, color: &str) -> Result<&str, KilnError> {
        if color.is_empty() {
            return Ok("");
        }
        if !self.operands.contains_key(color) {
            let [r, g, b] = parse_hex(color)?;
            self.decodes += 1;
            let text = format!(
                " {} {} {}",
                f64::from(r) / 255.0,
                f64::from(g) / 255.0,
                f64::from(b) / 255.0
            );
            log::trace!("color {} ->{}", color, text);
            self.operands.insert(color.to_owned(), text);
        }
        Ok(self.operands.get(color).map(String::as_str).unwrap_or_default())
    }

    /// Number of colors decoded so far, cache hits excluded.
    pub fn decode_count(&self) -> usize {
        self.decodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_channels() {
        let mut cache = ColorCache::default();
        assert_eq!(cache.operands("#FF0000").unwrap(), " 1 0 0");
        assert_eq!(cache.operands("#000000").unwrap(), " 0 0 0");
        assert_eq!(cache.operands("#0080ff").unwrap(), " 0 0.5019607843137255 1");
    }

    #[test]
    fn repeated_colors_are_cached() {
        let mut cache = ColorCache::default();
        let first = cache.operands("#336699").unwrap().to_owned();
        let second = cache.operands("#336699").unwrap().to_owned();
        assert_eq!(first, second);
        assert_eq!(cache.decode_count(), 1);
        cache.operands("#336698").unwrap();
        assert_eq!(cache.decode_count(), 2);
    }

    #[test]
    fn empty_and_malformed() {
        let mut cache = ColorCache::default();
        assert_eq!(cache.operands("").unwrap(), "");
        assert_eq!(cache.decode_count(), 0);
        for bad in ["red", "#12345", "#GG0000", "123456", "#1234567"] {
            assert_eq!(
                cache.operands(bad),
                Err(KilnError::InvalidColor(bad.to_owned())),
                "{}",
                bad
            );
        }
    }
}
