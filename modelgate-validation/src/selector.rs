// Validator selectors

/// Name of the rule set that holds rules declared without one
pub const DEFAULT_RULE_SET: &str = "default";

/// Rule set name that selects every rule
pub const ALL_RULE_SETS: &str = "*";

/// Chooses which rules of a validator run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidatorSelector {
    /// Rules declared outside any named rule set
    #[default]
    Default,
    /// Rules for the listed properties (and anything nested below them)
    Members(Vec<String>),
    /// Rules in the listed rule sets
    RuleSets(Vec<String>),
}

impl ValidatorSelector {
    pub fn members<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Members(members.into_iter().map(Into::into).collect())
    }

    pub fn rule_sets<I, S>(rule_sets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::RuleSets(rule_sets.into_iter().map(Into::into).collect())
    }

    /// Whether a rule in `rule_set` for `property_path` should run
    pub fn can_execute(&self, rule_set: Option<&str>, property_path: &str) -> bool {
        match self {
            ValidatorSelector::Default => {
                rule_set.is_none_or(|set| set.eq_ignore_ascii_case(DEFAULT_RULE_SET))
            }
            ValidatorSelector::Members(members) => members
                .iter()
                .any(|member| is_same_or_below(property_path, member)),
            ValidatorSelector::RuleSets(sets) => sets.iter().any(|set| {
                set == ALL_RULE_SETS
                    || set.eq_ignore_ascii_case(rule_set.unwrap_or(DEFAULT_RULE_SET))
            }),
        }
    }

    /// Whether nested rules below `property_path` may need to run
    pub fn can_descend(&self, rule_set: Option<&str>, property_path: &str) -> bool {
        match self {
            ValidatorSelector::Members(members) => members.iter().any(|member| {
                is_same_or_below(property_path, member) || is_same_or_below(member, property_path)
            }),
            _ => self.can_execute(rule_set, property_path),
        }
    }
}

fn is_same_or_below(path: &str, ancestor: &str) -> bool {
    match path.strip_prefix(ancestor) {
        Some(rest) => rest.is_empty() || rest.starts_with('.') || rest.starts_with('['),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selector() {
        let selector = ValidatorSelector::default();
        assert!(selector.can_execute(None, "Email"));
        assert!(selector.can_execute(Some("Default"), "Email"));
        assert!(!selector.can_execute(Some("Update"), "Email"));
    }

    #[test]
    fn test_member_selector() {
        let selector = ValidatorSelector::members(["Child", "Email"]);
        assert!(selector.can_execute(None, "Email"));
        assert!(selector.can_execute(Some("Update"), "Email"));
        assert!(selector.can_execute(None, "Child.Name"));
        assert!(selector.can_execute(None, "Child[0]"));
        assert!(!selector.can_execute(None, "Children"));
        assert!(!selector.can_execute(None, "Surname"));
    }

    #[test]
    fn test_member_selector_descends_to_nested_members() {
        let selector = ValidatorSelector::members(["Child.Name"]);
        assert!(selector.can_descend(None, "Child"));
        assert!(!selector.can_execute(None, "Child"));
        assert!(!selector.can_descend(None, "Address"));
    }

    #[test]
    fn test_rule_set_selector() {
        let selector = ValidatorSelector::rule_sets(["Update"]);
        assert!(selector.can_execute(Some("update"), "Email"));
        assert!(!selector.can_execute(None, "Email"));

        let selector = ValidatorSelector::rule_sets(["default", "Update"]);
        assert!(selector.can_execute(None, "Email"));

        let selector = ValidatorSelector::rule_sets([ALL_RULE_SETS]);
        assert!(selector.can_execute(Some("Anything"), "Email"));
        assert!(selector.can_execute(None, "Email"));
    }
}
