use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Coach,
    Member,
}

impl UserRole {
    /// Admins and coaches manage templates and assign them to members.
    pub fn is_staff(self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Coach)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UserRole::Admin => "admin",
            UserRole::Coach => "coach",
            UserRole::Member => "member",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for UserRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "coach" => Ok(UserRole::Coach),
            "member" => Ok(UserRole::Member),
            _ => Err(anyhow::anyhow!("Unknown role: {s}")),
        }
    }
}
