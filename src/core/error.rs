use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayoffError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("payoff date is outside the supported calendar range")]
    DateOutOfRange,
}

pub type PayoffResult<T> = Result<T, PayoffError>;

pub(crate) fn ensure_finite(name: &str, value: f64) -> PayoffResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PayoffError::InvalidInput(format!("{name} must be a finite number")))
    }
}

pub(crate) fn ensure_non_negative(name: &str, value: f64) -> PayoffResult<()> {
    ensure_finite(name, value)?;
    if value < 0.0 {
        return Err(PayoffError::InvalidInput(format!("{name} must be >= 0")));
    }
    Ok(())
}
