//! Greedy minimum-weight-matching decoder: pairs each violated stabilizer
//! with its nearest unmatched partner. Not globally optimal — a true MWPM
//! needs a blossom algorithm — but cheap and good enough for the sparse
//! error patterns low-noise runs produce.

use super::Decoder;
use crate::surface_code::Syndrome;

pub struct MwpmDecoder {
    code_distance: usize,
}

impl Default for MwpmDecoder {
    fn default() -> Self {
        MwpmDecoder::new(3)
    }
}

impl MwpmDecoder {
    pub fn new(code_distance: usize) -> Self {
        MwpmDecoder { code_distance }
    }

    fn weight(a: usize, b: usize) -> f64 {
        (a as f64 - b as f64).abs()
    }

    fn find_matching(&self, violations: &[usize]) -> Vec<(usize, usize)> {
        let mut matched = vec![false; violations.len()];
        let mut matching = Vec::new();

        for i in 0..violations.len() {
            if matched[i] {
                continue;
            }
            let mut best_partner = None;
            let mut best_weight = f64::INFINITY;
            for j in (i + 1)..violations.len() {
                if matched[j] {
                    continue;
                }
                let weight = Self::weight(violations[i], violations[j]);
                if weight < best_weight {
                    best_weight = weight;
                    best_partner = Some(j);
                }
            }
            if let Some(j) = best_partner {
                matching.push((violations[i], violations[j]));
                matched[i] = true;
                matched[j] = true;
            }
        }
        matching
    }
}

impl Decoder for MwpmDecoder {
    fn decode(&self, syndrome: &Syndrome) -> Vec<usize> {
        let violations = syndrome.violated_stabilizers();
        if violations.is_empty() {
            return Vec::new();
        }
        let matching = self.find_matching(&violations);
        matching.into_iter().flat_map(|(a, b)| [a, b]).collect()
    }

    fn name(&self) -> &'static str {
        "MWPM"
    }

    fn code_distance(&self) -> usize {
        self.code_distance
    }

    fn set_code_distance(&mut self, d: usize) {
        self.code_distance = d;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_violations_decode_to_empty_correction() {
        let decoder = MwpmDecoder::new(3);
        let syndrome = Syndrome::new(8, 3);
        assert!(decoder.decode(&syndrome).is_empty());
    }

    #[test]
    fn two_violations_are_matched_together() {
        let decoder = MwpmDecoder::new(3);
        let mut syndrome = Syndrome::new(8, 3);
        syndrome.set(1, true).unwrap();
        syndrome.set(5, true).unwrap();
        let correction = decoder.decode(&syndrome);
        assert_eq!(correction.len(), 2);
        assert!(correction.contains(&1));
        assert!(correction.contains(&5));
    }

    #[test]
    fn default_decoder_uses_distance_three() {
        assert_eq!(MwpmDecoder::default().code_distance(), 3);
    }

    #[test]
    fn set_code_distance_updates_the_decoder() {
        let mut decoder = MwpmDecoder::new(3);
        decoder.set_code_distance(5);
        assert_eq!(decoder.code_distance(), 5);
    }

    #[test]
    fn odd_violation_count_leaves_one_unmatched() {
        let decoder = MwpmDecoder::new(3);
        let mut syndrome = Syndrome::new(8, 3);
        syndrome.set(0, true).unwrap();
        syndrome.set(2, true).unwrap();
        syndrome.set(4, true).unwrap();
        let correction = decoder.decode(&syndrome);
        assert_eq!(correction.len(), 2);
    }
}
