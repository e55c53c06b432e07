//! Per-schema color assignment.

use ahash::AHashMap;
use rand::rngs::StdRng;
use rand::RngExt;

/// Hex digits restricted to the upper half so generated colors stay light
/// enough to read dark node labels against.
const LIGHT_HEX: &[u8] = b"6789ABCDEF";

/// Mapping from schema name to a generated hex color.
///
/// One instance is threaded through every render call of a run, so a schema
/// keeps the same color in the overall diagram and its per-schema diagram.
#[derive(Debug, Default)]
pub struct SchemaColors {
    colors: AHashMap<String, String>,
}

impl SchemaColors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for a schema, generating and remembering one on first sight.
    pub fn color_for(&mut self, schema: &str, rng: &mut StdRng) -> String {
        if let Some(color) = self.colors.get(schema) {
            return color.clone();
        }
        let mut color = String::with_capacity(7);
        color.push('#');
        for _ in 0..6 {
            color.push(LIGHT_HEX[rng.random_range(0..LIGHT_HEX.len())] as char);
        }
        self.colors.insert(schema.to_string(), color.clone());
        color
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_color_format() {
        let mut colors = SchemaColors::new();
        let mut rng = StdRng::seed_from_u64(1);
        let c = colors.color_for("sales", &mut rng);
        assert_eq!(c.len(), 7);
        assert!(c.starts_with('#'));
        assert!(c[1..].bytes().all(|b| LIGHT_HEX.contains(&b)));
    }

    #[test]
    fn test_same_schema_same_color() {
        let mut colors = SchemaColors::new();
        let mut rng = StdRng::seed_from_u64(1);
        let first = colors.color_for("sales", &mut rng);
        let _ = colors.color_for("hr", &mut rng);
        let second = colors.color_for("sales", &mut rng);
        assert_eq!(first, second);
        assert_eq!(colors.len(), 2);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let mut a = SchemaColors::new();
        let mut b = SchemaColors::new();
        let mut rng_a = StdRng::seed_from_u64(9);
        let mut rng_b = StdRng::seed_from_u64(9);
        assert_eq!(
            a.color_for("sales", &mut rng_a),
            b.color_for("sales", &mut rng_b)
        );
    }
}
