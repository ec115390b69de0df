use serde::{Deserialize, Serialize};

/// Derived count of completed poem kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// 0.0 .. 100.0
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }

    pub fn label(&self) -> String {
        format!("Complete {}/{} poems", self.completed, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_and_percent() {
        let p = Progress {
            completed: 2,
            total: 5,
        };
        assert_eq!(p.label(), "Complete 2/5 poems");
        assert!((p.percent() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_total_is_zero_percent() {
        let p = Progress {
            completed: 0,
            total: 0,
        };
        assert_eq!(p.percent(), 0.0);
    }
}
