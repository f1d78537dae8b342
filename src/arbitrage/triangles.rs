//! Enumeration of three-symbol trading cycles.

use super::metadata::MetadataIndex;
use std::collections::HashSet;
use std::fmt;

/// Three symbols that chain back to the starting asset of the first one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub legs: [String; 3],
}

impl Triangle {
    pub fn new(s1: &str, s2: &str, s3: &str) -> Self {
        Self {
            legs: [s1.to_string(), s2.to_string(), s3.to_string()],
        }
    }

    /// Order-independent identity of the three symbols.
    pub fn key(&self) -> [String; 3] {
        let mut key = self.legs.clone();
        key.sort();
        key
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {} → {}", self.legs[0], self.legs[1], self.legs[2])
    }
}

/// Build every distinct triangle reachable in `index`.
///
/// For each `s1 = base1/quote1` we walk to any `s2` touching `quote1`, take its
/// other side as the middle asset, then look for an `s3` joining the middle
/// asset back to `base1`. A triangle is kept once per unordered symbol set,
/// in the orientation it was first discovered.
pub fn build_triangles(index: &MetadataIndex) -> Vec<Triangle> {
    let mut seen: HashSet<[String; 3]> = HashSet::new();
    let mut triangles = Vec::new();

    for (sym1, info1) in index.iter() {
        let base1 = info1.base.as_str();
        let quote1 = info1.quote.as_str();

        for sym2 in index.symbols_for(quote1) {
            let Some(info2) = index.get(sym2) else {
                continue;
            };
            let mid = if info2.base == quote1 {
                info2.quote.as_str()
            } else if info2.quote == quote1 {
                info2.base.as_str()
            } else {
                continue;
            };
            if mid == base1 {
                continue;
            }

            for sym3 in index.symbols_for(mid) {
                let Some(info3) = index.get(sym3) else {
                    continue;
                };
                let closes = (info3.base == base1 && info3.quote == mid)
                    || (info3.quote == base1 && info3.base == mid);
                if !closes {
                    continue;
                }
                let triangle = Triangle::new(sym1, sym2, sym3);
                if seen.insert(triangle.key()) {
                    triangles.push(triangle);
                }
            }
        }
    }

    triangles
}
