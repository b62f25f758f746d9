//! Populating rosters from template soldiers.

use crate::error::{ensure_positive, BattleError, Result};
use crate::soldier::Soldier;

/// Returns `copies` independent clones of each template, grouped by template
/// in input order.
///
/// Templates are never damaged before cloning, so every copy starts at the
/// template's full health.
///
/// # Errors
///
/// Returns [`BattleError::NoTemplates`] if `templates` is empty and
/// [`BattleError::NonPositive`] if `copies` is zero.
///
/// # Example
///
/// ```
/// use platoon_core::{clone_soldiers, Soldier};
///
/// let templates = [Soldier::basic(100, 60, 50).unwrap(), Soldier::sniper(1.6, 100, 45, 45).unwrap()];
/// let roster = clone_soldiers(&templates, 3).unwrap();
///
/// assert_eq!(roster.len(), 6);
/// assert_eq!(roster[2].kind().name(), "basic");
/// assert_eq!(roster[3].kind().name(), "sniper");
/// ```
pub fn clone_soldiers(templates: &[Soldier], copies: usize) -> Result<Vec<Soldier>> {
    if templates.is_empty() {
        return Err(BattleError::NoTemplates);
    }
    ensure_positive("copies", i64::try_from(copies).unwrap_or(i64::MAX))?;

    Ok(templates
        .iter()
        .flat_map(|template| std::iter::repeat(template).take(copies).cloned())
        .collect())
}
