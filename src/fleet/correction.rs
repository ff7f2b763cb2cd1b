//! Per-class actor corrections, matched by node-name prefix.

use glam::Vec3;

use crate::error::MotorcadeError;

/// One correction class: actors whose node name starts with `prefix` get
/// this body-node fix-up.
#[derive(Debug, Clone)]
pub struct CorrectionRule {
    /// Node-name prefix this rule applies to.
    pub prefix: String,
    /// Vertical offset for the body node, in model units.
    pub height: f32,
    /// Fixed body-node rotation, XYZ Euler radians.
    pub rotation: Vec3,
}

impl CorrectionRule {
    /// Build a rule.
    #[must_use]
    pub fn new(prefix: impl Into<String>, height: f32, rotation: Vec3) -> Self {
        Self {
            prefix: prefix.into(),
            height,
            rotation,
        }
    }
}

/// Ordered correction rules, checked first-to-last.
///
/// Every actor must match exactly one rule; an unmatched actor is a fatal
/// configuration error, since silently skipping the fix-up would leave a
/// visible object misplaced.
#[derive(Debug, Clone, Default)]
pub struct CorrectionTable {
    rules: Vec<CorrectionRule>,
}

impl CorrectionTable {
    /// Table from an ordered rule list.
    #[must_use]
    pub fn new(rules: Vec<CorrectionRule>) -> Self {
        Self { rules }
    }

    /// The rules, in priority order.
    #[must_use]
    pub fn rules(&self) -> &[CorrectionRule] {
        &self.rules
    }

    /// First rule whose prefix matches `name`.
    ///
    /// # Errors
    ///
    /// Returns [`MotorcadeError::UnmatchedActor`] when no rule matches.
    pub fn lookup(&self, name: &str) -> Result<&CorrectionRule, MotorcadeError> {
        self.rules
            .iter()
            .find(|rule| name.starts_with(&rule.prefix))
            .ok_or_else(|| MotorcadeError::UnmatchedActor(name.to_owned()))
    }
}
