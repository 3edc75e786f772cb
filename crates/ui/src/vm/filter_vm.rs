/// Label of the option that clears the group filter.
pub const ALL_LABEL: &str = "All Employees";

/// One entry of the group selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterOptionVm {
    /// `None` for the "all" option.
    pub value: Option<String>,
    pub label: String,
    pub selected: bool,
}

/// Build the selector: the "all" option first, then every group in store order.
#[must_use]
pub fn map_filter_options(groups: &[String], current: Option<&str>) -> Vec<FilterOptionVm> {
    let all = FilterOptionVm {
        value: None,
        label: ALL_LABEL.to_owned(),
        selected: current.is_none(),
    };
    std::iter::once(all)
        .chain(groups.iter().map(|group| FilterOptionVm {
            value: Some(group.clone()),
            label: group.clone(),
            selected: current == Some(group.as_str()),
        }))
        .collect()
}

/// Resolve typed input to a known group name.
///
/// Exact matches win over case-insensitive ones. Unknown input is returned
/// trimmed so the engine can report an empty round for it.
#[must_use]
pub fn resolve_group(input: &str, groups: &[String]) -> String {
    let input = input.trim();
    if let Some(exact) = groups.iter().find(|g| g.as_str() == input) {
        return exact.clone();
    }
    groups
        .iter()
        .find(|g| g.eq_ignore_ascii_case(input))
        .cloned()
        .unwrap_or_else(|| input.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> Vec<String> {
        vec!["Engineering".into(), "Sales".into(), "sales".into()]
    }

    #[test]
    fn all_option_comes_first_and_is_selected_without_filter() {
        let options = map_filter_options(&groups(), None);

        assert_eq!(options.len(), 4);
        assert_eq!(options[0].label, ALL_LABEL);
        assert_eq!(options[0].value, None);
        assert!(options[0].selected);
        assert!(options[1..].iter().all(|o| !o.selected));
    }

    #[test]
    fn current_group_is_selected() {
        let options = map_filter_options(&groups(), Some("Sales"));

        let selected: Vec<_> = options.iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value.as_deref(), Some("Sales"));
    }

    #[test]
    fn resolve_prefers_exact_then_case_insensitive() {
        assert_eq!(resolve_group("sales", &groups()), "sales");
        assert_eq!(resolve_group(" engineering ", &groups()), "Engineering");
        assert_eq!(resolve_group("Marketing", &groups()), "Marketing");
    }
}
