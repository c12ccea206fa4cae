use serde::{Deserialize, Serialize};

/// 절대 상한선: 한글 기준 공백 포함 500자 (약 1500 bytes)
pub const ABSOLUTE_MAX: usize = 500;

/// Character budget for one generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptBudget {
    /// Hard upper bound on the final text, in characters
    pub ceiling: usize,

    /// Advisory length written into the instructions sent to the model
    pub prompt_target: usize,
}

impl PromptBudget {
    /// Buffer ratio applied to this budget's ceiling
    pub fn buffer_ratio(&self) -> f64 {
        buffer_percent(self.ceiling) as f64 / 100.0
    }
}

/// Clamp a requested character count to [`ABSOLUTE_MAX`]
pub fn clamp_ceiling(requested_chars: usize) -> usize {
    requested_chars.min(ABSOLUTE_MAX)
}

/// Buffer ratio for a ceiling: shorter texts get a larger safety margin
pub fn buffer_ratio(ceiling: usize) -> f64 {
    buffer_percent(ceiling) as f64 / 100.0
}

fn buffer_percent(ceiling: usize) -> usize {
    match ceiling {
        0..=100 => 70,
        101..=150 => 75,
        151..=200 => 80,
        201..=300 => 85,
        _ => 90,
    }
}

/// Compute the clamped ceiling and the smaller target to ask the model for
///
/// Models overshoot requested lengths, so the prompt asks for less than the
/// ceiling and the truncator enforces the ceiling afterwards.
pub fn compute_prompt_budget(requested_chars: usize) -> PromptBudget {
    let ceiling = clamp_ceiling(requested_chars);
    // integer percent keeps the floor exact
    let prompt_target = ceiling * buffer_percent(ceiling) / 100;

    PromptBudget {
        ceiling,
        prompt_target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_small_and_clamped() {
        assert_eq!(
            compute_prompt_budget(100),
            PromptBudget { ceiling: 100, prompt_target: 70 }
        );
        assert_eq!(
            compute_prompt_budget(600),
            PromptBudget { ceiling: 500, prompt_target: 450 }
        );
    }

    #[test]
    fn test_buffer_ratio_tiers() {
        assert_eq!(buffer_ratio(1), 0.70);
        assert_eq!(buffer_ratio(100), 0.70);
        assert_eq!(buffer_ratio(101), 0.75);
        assert_eq!(buffer_ratio(150), 0.75);
        assert_eq!(buffer_ratio(151), 0.80);
        assert_eq!(buffer_ratio(200), 0.80);
        assert_eq!(buffer_ratio(201), 0.85);
        assert_eq!(buffer_ratio(300), 0.85);
        assert_eq!(buffer_ratio(301), 0.90);
        assert_eq!(buffer_ratio(500), 0.90);
    }

    #[test]
    fn test_preset_sizes() {
        assert_eq!(compute_prompt_budget(200).prompt_target, 160);
        assert_eq!(compute_prompt_budget(330).prompt_target, 297);
        assert_eq!(compute_prompt_budget(500).prompt_target, 450);
        assert_eq!(compute_prompt_budget(150).prompt_target, 112);
        assert_eq!(compute_prompt_budget(300).prompt_target, 255);
    }

    #[test]
    fn test_budget_monotonicity() {
        for n in 1..=1000 {
            let budget = compute_prompt_budget(n);
            assert_eq!(budget.ceiling, n.min(ABSOLUTE_MAX));
            assert!(budget.prompt_target <= budget.ceiling);
        }
    }
}
