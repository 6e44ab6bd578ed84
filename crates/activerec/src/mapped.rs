//! The declaration surface for mapped types.

use activerec_core::Table;

/// A mapped type: an application-defined marker type bound to one table.
///
/// Implementing this trait is all the declaration a mapped type needs; the
/// generic [`Record`](crate::Record) carries the behavior.
///
/// # Example
///
/// ```
/// use activerec::{Mapped, Table};
///
/// struct Person;
///
/// impl Mapped for Person {
///     const CLASS_NAME: &'static str = "Person";
///
///     fn table() -> Table {
///         Table::new("people")
///     }
/// }
/// ```
pub trait Mapped {
    /// The type's identifying name, used as the registry key and for
    /// deriving foreign-key column names. Must be non-empty.
    const CLASS_NAME: &'static str;

    /// The table descriptor this type maps to.
    fn table() -> Table;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Person;

    impl Mapped for Person {
        const CLASS_NAME: &'static str = "Person";

        fn table() -> Table {
            Table::new("people")
        }
    }

    #[test]
    fn declaration_carries_name_and_table() {
        assert_eq!(Person::CLASS_NAME, "Person");
        assert_eq!(Person::table().table_name(), "people");
        assert_eq!(Person::table().primary_key_name(), "id");
    }
}
