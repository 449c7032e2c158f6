use std::fmt;
use std::str::FromStr;

use jabeja_core::errors::{ErrorInfo, JabejaError};
use jabeja_core::{Color, RandomSource};
use serde::{Deserialize, Serialize};

/// Policy used to hand out the initial colors when a graph is built.
///
/// Colors are assigned over nodes in ascending id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitialColoring {
    /// The i-th node gets color `i mod k`.
    #[default]
    RoundRobin,
    /// Every node draws a uniform color in `[0, k)`.
    Random,
    /// Nodes are cut into `k` contiguous blocks of `ceil(n / k)` nodes.
    Batch,
}

impl InitialColoring {
    /// Produces one color per node for `node_count` nodes and `partitions` colors.
    pub fn assign<R: RandomSource>(
        &self,
        node_count: usize,
        partitions: u32,
        rng: &mut R,
    ) -> Result<Vec<Color>, JabejaError> {
        if partitions == 0 {
            return Err(JabejaError::Config(
                ErrorInfo::new("zero-partitions", "at least one partition is required")
                    .with_context("policy", self.to_string()),
            ));
        }
        let k = partitions as usize;
        let colors = match self {
            InitialColoring::RoundRobin => (0..node_count).map(|i| (i % k) as Color).collect(),
            InitialColoring::Random => (0..node_count)
                .map(|_| rng.next_index(k) as Color)
                .collect(),
            InitialColoring::Batch => {
                let block = node_count.div_ceil(k).max(1);
                (0..node_count).map(|i| (i / block) as Color).collect()
            }
        };
        Ok(colors)
    }

    fn as_str(&self) -> &'static str {
        match self {
            InitialColoring::RoundRobin => "round-robin",
            InitialColoring::Random => "random",
            InitialColoring::Batch => "batch",
        }
    }
}

impl fmt::Display for InitialColoring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InitialColoring {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "round-robin" => Ok(InitialColoring::RoundRobin),
            "random" => Ok(InitialColoring::Random),
            "batch" => Ok(InitialColoring::Batch),
            other => Err(format!(
                "unknown coloring policy `{other}` (expected round-robin, random or batch)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jabeja_core::RngHandle;

    #[test]
    fn round_robin_cycles_colors() {
        let mut rng = RngHandle::from_seed(0);
        let colors = InitialColoring::RoundRobin.assign(7, 3, &mut rng).unwrap();
        assert_eq!(colors, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn batch_uses_contiguous_blocks() {
        let mut rng = RngHandle::from_seed(0);
        let colors = InitialColoring::Batch.assign(10, 4, &mut rng).unwrap();
        assert_eq!(colors, vec![0, 0, 0, 1, 1, 1, 2, 2, 2, 3]);
    }

    #[test]
    fn random_stays_in_range_and_is_seeded() {
        let a = InitialColoring::Random
            .assign(64, 5, &mut RngHandle::from_seed(11))
            .unwrap();
        let b = InitialColoring::Random
            .assign(64, 5, &mut RngHandle::from_seed(11))
            .unwrap();
        assert_eq!(a, b);
        assert!(a.iter().all(|&color| color < 5));
    }

    #[test]
    fn zero_partitions_is_rejected() {
        let err = InitialColoring::Batch
            .assign(3, 0, &mut RngHandle::from_seed(0))
            .unwrap_err();
        assert_eq!(err.info().code, "zero-partitions");
    }

    #[test]
    fn parses_cli_spellings() {
        assert_eq!(
            "ROUND_ROBIN".parse::<InitialColoring>().unwrap(),
            InitialColoring::RoundRobin
        );
        assert_eq!("batch".parse::<InitialColoring>().unwrap(), InitialColoring::Batch);
        assert!("striped".parse::<InitialColoring>().is_err());
    }
}
