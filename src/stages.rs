use crate::{
    codec::ObfuscatedPayload,
    payloads::{STAGE_FIVE_OBSCURED, STAGE_FOUR_OBSCURED, STAGE_THREE_MODULE, STAGE_TWO_MODULE, XOR_ORACLE_MODULE},
    types::{FailurePolicy, StageId, STAGE_COUNT, STATIC_XOR_KEY},
    validator::Validator,
};

/// One link of the chain. Success installs `id.next()`, or ends the chain after the last stage.
#[derive(Debug, Clone)]
pub struct Stage {
    pub id: StageId,
    pub validator: Validator,
    /// Require the automation window to have passed before validating.
    pub timed: bool,
    pub on_failure: FailurePolicy,
}

impl Stage {
    fn new(n: u8, validator: Validator) -> Self {
        let id = StageId::new(n).unwrap_or(StageId::LAST);
        Self { id, validator, timed: false, on_failure: FailurePolicy::Reset }
    }

    fn timed(mut self) -> Self {
        self.timed = true;
        self
    }

    fn trapping(mut self) -> Self {
        self.on_failure = FailurePolicy::Trap;
        self
    }
}

fn first_digit(v: i32) -> bool { v == 1 }

fn sixth_digit(v: i32) -> bool {
    (v & 0x03) == 0 && (v & 0x04) == 0 && (v >> 3) == 1
}

fn last_digit(v: i32) -> bool { v == 2 }

/// The fixed seven-stage chain.
#[must_use]
pub fn default_chain() -> [Stage; STAGE_COUNT as usize] {
    [
        Stage::new(1, Validator::Inline(first_digit)),
        Stage::new(2, Validator::Staged { module: STAGE_TWO_MODULE, export: "oh_no" }),
        Stage::new(3, Validator::Native { module: STAGE_THREE_MODULE, export: "_oh_no" }),
        Stage::new(4, Validator::Obscured {
            payload: ObfuscatedPayload::obscured(STAGE_FOUR_OBSCURED, STATIC_XOR_KEY),
            export: "oh_no",
        }),
        Stage::new(5, Validator::OracleDecoded {
            oracle: XOR_ORACLE_MODULE,
            oracle_export: "lolwat",
            payload: STAGE_FIVE_OBSCURED,
            export: "wetsand",
        })
        .timed()
        .trapping(),
        Stage::new(6, Validator::Inline(sixth_digit)),
        Stage::new(7, Validator::Inline(last_digit)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StdHost;

    #[test]
    fn ids_run_in_order() {
        let chain = default_chain();
        for (i, stage) in chain.iter().enumerate() {
            assert_eq!(stage.id.index(), i);
        }
        assert!(chain[STAGE_COUNT as usize - 1].id.is_last());
    }

    #[test]
    fn each_stage_accepts_exactly_one_button() {
        let host = StdHost::default();
        let accepted: Vec<Vec<i32>> = default_chain()
            .iter()
            .map(|s| (0..=9).filter(|&v| s.validator.evaluate(&host, v).unwrap()).collect())
            .collect();
        assert_eq!(accepted, vec![vec![1], vec![9], vec![4], vec![7], vec![4], vec![8], vec![2]]);
    }

    #[test]
    fn sixth_digit_rejects_neighbours_of_eight() {
        assert!(sixth_digit(8));
        for v in [0, 7, 9, 12, 15, 16, -8, i32::MIN] {
            assert!(!sixth_digit(v), "{v}");
        }
    }

    #[test]
    fn only_stage_five_is_timed_and_trapping() {
        for stage in default_chain() {
            let special = stage.id.get() == 5;
            assert_eq!(stage.timed, special);
            assert_eq!(stage.on_failure == FailurePolicy::Trap, special);
        }
    }
}
