/// bcrypt work factor used for every stored password.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordConfig {
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let cost = crate::env_or("BCRYPT_COST", bcrypt::DEFAULT_COST);
        Self {
            // bcrypt rejects costs outside 4..=31
            bcrypt_cost: cost.clamp(4, 31),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cost() {
        assert_eq!(PasswordConfig::default().bcrypt_cost, bcrypt::DEFAULT_COST);
    }
}
