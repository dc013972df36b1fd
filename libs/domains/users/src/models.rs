/// A stored user record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Validated input for creating a user
///
/// Only produced by [`crate::validation::validate_new_user`], so `name` is
/// always trimmed and `email` always lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Filter for listing users
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive substring of the name; `None` lists everyone
    pub name_contains: Option<String>,
}

impl UserFilter {
    /// Build a filter from an optional raw name filter.
    ///
    /// The value is trimmed and a blank filter means no filter.
    pub fn from_name(name_filter: Option<&str>) -> Self {
        let name_contains = name_filter
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        Self { name_contains }
    }

    /// Whether `user` passes this filter
    pub fn matches(&self, user: &User) -> bool {
        match &self.name_contains {
            Some(needle) => user.name.to_lowercase().contains(&needle.to_lowercase()),
            None => true,
        }
    }
}
