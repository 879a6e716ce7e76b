/// Represents a field update operation for partial updates
///
/// Three states for optional fields:
/// - `NoChange`: field keeps its existing value
/// - `Set(value)`: field is updated to the provided value
/// - `Clear`: field is cleared (set to None)
///
/// # Example
///
/// ```
/// use taskboard_domain::FieldUpdate;
///
/// let mut completed_at = Some(3);
/// FieldUpdate::Clear.apply_to(&mut completed_at);
/// assert_eq!(completed_at, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    #[default]
    NoChange,
    Set(T),
    Clear,
}

impl<T> FieldUpdate<T> {
    /// Apply this update to an optional field
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = Some(value),
            FieldUpdate::Clear => *field = None,
        }
    }

    /// Check if this represents a change (not NoChange)
    pub fn is_change(&self) -> bool {
        !matches!(self, FieldUpdate::NoChange)
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    /// `Some(value)` becomes `Set(value)`, `None` becomes `Clear`
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}
