pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_arg(name, condition)
    }
}

/// Checks that `index` addresses an existing element (`index < len`).
#[inline]
pub fn verify_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        out_of_range(index, len)
    }
}

/// Checks that `index` is a valid cursor or insertion position (`index <= len`).
#[inline]
pub fn verify_position(index: usize, len: usize) -> Result<()> {
    if index <= len {
        Ok(())
    } else {
        out_of_range(index, len)
    }
}

#[cold]
pub fn invalid_arg(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidArgument {
        name: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[cold]
fn out_of_range(index: usize, len: usize) -> Result<()> {
    Err(crate::error::ErrorKind::OutOfRange { index, len }.into())
}
