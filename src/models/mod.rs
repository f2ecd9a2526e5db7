pub mod feedback;
pub mod user;

pub use feedback::Feedback;
pub use user::{NewUser, User};

/// Single row of a `RETURNING` write
///
/// Writes go through `fetch_all` so the statement runs to completion, and
/// commits, before the caller sees the row.
fn first_row<T>(rows: Vec<T>) -> Option<T> {
    rows.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_row() {
        assert_eq!(first_row(vec![3, 4]), Some(3));
        assert_eq!(first_row(Vec::<i64>::new()), None);
    }
}
