use cards_core::model::RecordId;
use services::SessionEngine;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm {
    /// 1-based number the user types to pick this choice.
    pub number: usize,
    pub id: RecordId,
    pub label: String,
    pub disabled: bool,
}

/// Everything a renderer needs to draw the current round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundVm {
    pub photo_url: String,
    /// Group, job title and location, skipping the ones that are unknown.
    pub caption: Vec<String>,
    pub choices: Vec<ChoiceVm>,
    pub progress_label: String,
    pub previous_label: Option<String>,
}

impl RoundVm {
    /// Id of the choice numbered `number`, if there is one.
    #[must_use]
    pub fn choice_id(&self, number: usize) -> Option<&RecordId> {
        self.choices
            .iter()
            .find(|c| c.number == number)
            .map(|c| &c.id)
    }
}

/// Map the engine's current round; `None` when there is nothing to show.
#[must_use]
pub fn map_round(engine: &SessionEngine) -> Option<RoundVm> {
    let round = engine.current_round()?;
    let target = round.target();

    let caption = [target.group(), target.job_title(), target.location()]
        .into_iter()
        .flatten()
        .map(str::to_owned)
        .collect();

    let choices = round
        .choices()
        .iter()
        .enumerate()
        .map(|(index, record)| ChoiceVm {
            number: index + 1,
            id: record.id().clone(),
            label: record.label(),
            disabled: round.is_disabled(record.id()),
        })
        .collect();

    let progress = engine.progress();
    let previous_label = engine
        .previous_answer()
        .map(|previous| format!("Previous: {}", previous.label()));

    Some(RoundVm {
        photo_url: target.photo_url().to_owned(),
        caption,
        choices,
        progress_label: format!("{} / {}", progress.consumed, progress.total),
        previous_label,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cards_core::model::RecordDraft;
    use std::sync::Arc;
    use storage::RecordStore;

    fn engine() -> SessionEngine {
        let store = RecordStore::from_records((1..=5_u64).map(|id| {
            let photo = format!("https://img/{id}.jpg");
            RecordDraft::new(id.to_string(), format!("Display {id}"), photo)
                .with_names(format!("Pref{id}"), format!("Last{id}"))
                .with_group("Eng")
                .with_job_title("Engineer")
                .validate()
                .unwrap()
        }));
        SessionEngine::builder(Arc::new(store)).with_seed(9).start()
    }

    #[test]
    fn maps_target_and_numbered_choices() {
        let engine = engine();
        let vm = map_round(&engine).unwrap();
        let target = engine.current_round().unwrap().target();

        assert_eq!(vm.photo_url, target.photo_url());
        assert_eq!(vm.caption, vec!["Eng".to_string(), "Engineer".to_string()]);
        assert_eq!(
            vm.choices.iter().map(|c| c.number).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
        assert!(vm.choices.iter().all(|c| c.label.starts_with("Pref")));
        assert_eq!(vm.progress_label, "0 / 5");
        assert_eq!(vm.previous_label, None);
    }

    #[test]
    fn reflects_disabled_choices_and_previous_answer() {
        let mut engine = engine();
        let vm = map_round(&engine).unwrap();
        let target = engine.current_round().unwrap().target().clone();
        let wrong = vm.choices.iter().find(|c| &c.id != target.id()).unwrap();

        engine.guess(&wrong.id);
        let vm = map_round(&engine).unwrap();
        assert!(vm.choices.iter().any(|c| c.id == wrong.id && c.disabled));

        engine.guess(target.id());
        let vm = map_round(&engine).unwrap();
        assert_eq!(vm.previous_label, Some(format!("Previous: {}", target.label())));
        assert_eq!(vm.progress_label, "1 / 5");
    }

    #[test]
    fn choice_id_looks_up_by_number() {
        let vm = map_round(&engine()).unwrap();
        assert_eq!(vm.choice_id(1), Some(&vm.choices[0].id));
        assert_eq!(vm.choice_id(0), None);
        assert_eq!(vm.choice_id(5), None);
    }
}
