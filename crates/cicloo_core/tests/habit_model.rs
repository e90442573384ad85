use chrono::NaiveDate;
use cicloo_core::{
    xp_required_for_level, Category, CompletionOutcome, Habit, HabitFields, HabitValidationError,
    Priority, Recurrence, MAX_LEVEL,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn fields(name: &str, recurrence: Recurrence) -> HabitFields {
    HabitFields::new(name, Category::Health, recurrence, Priority::High)
}

#[test]
fn habit_new_sets_defaults() {
    let habit = Habit::new(fields("Drink 2L of water", Recurrence::Daily)).unwrap();

    assert_eq!(habit.id(), 0);
    assert_eq!(habit.name(), "Drink 2L of water");
    assert_eq!(habit.level(), 1);
    assert_eq!(habit.xp(), 0);
    assert_eq!(habit.streak(), 0);
    assert_eq!(habit.total_completions(), 0);
    assert_eq!(habit.last_completion(), None);
    assert_eq!(habit.xp_for_next_level(), 30);
}

#[test]
fn habit_new_rejects_blank_and_short_names() {
    let err = Habit::new(fields("   ", Recurrence::Daily)).unwrap_err();
    assert_eq!(err, HabitValidationError::EmptyName);

    let err = Habit::new(fields(" ab ", Recurrence::Daily)).unwrap_err();
    assert_eq!(err, HabitValidationError::NameTooShort { min: 3, actual: 2 });
}

#[test]
fn habit_name_is_trimmed() {
    let habit = Habit::new(fields("  Run  ", Recurrence::Weekly)).unwrap();
    assert_eq!(habit.name(), "Run");
}

#[test]
fn fields_parse_rejects_unknown_tags() {
    let err = HabitFields::parse("Meditate", "hobbies", "daily", "high").unwrap_err();
    assert_eq!(err, HabitValidationError::UnknownCategory("hobbies".to_string()));

    let err = HabitFields::parse("Meditate", "health", "hourly", "high").unwrap_err();
    assert_eq!(err, HabitValidationError::UnknownRecurrence("hourly".to_string()));

    let err = HabitFields::parse("Meditate", "health", "daily", "urgent").unwrap_err();
    assert_eq!(err, HabitValidationError::UnknownPriority("urgent".to_string()));

    let parsed = HabitFields::parse("Meditate", "Spirituality", "custom", "Medium").unwrap();
    assert_eq!(parsed.category, Category::Spirituality);
    assert_eq!(parsed.recurrence, Recurrence::Custom);
    assert_eq!(parsed.priority, Priority::Medium);
}

#[test]
fn update_basic_fields_preserves_progression() {
    let mut habit = Habit::new(fields("Stretch", Recurrence::Daily)).unwrap();
    habit.set_id(9);
    habit.mark_completed(date(2025, 6, 1));
    habit.mark_completed(date(2025, 6, 2));

    habit
        .update_basic_fields(HabitFields::new(
            "Morning stretch",
            Category::SelfCare,
            Recurrence::Weekly,
            Priority::Low,
        ))
        .unwrap();

    assert_eq!(habit.id(), 9);
    assert_eq!(habit.name(), "Morning stretch");
    assert_eq!(habit.category(), Category::SelfCare);
    assert_eq!(habit.recurrence(), Recurrence::Weekly);
    assert_eq!(habit.priority(), Priority::Low);
    assert_eq!(habit.streak(), 2);
    assert_eq!(habit.total_completions(), 2);
    assert_eq!((habit.level(), habit.xp()), (2, 10));
    assert_eq!(habit.last_completion(), Some(date(2025, 6, 2)));
}

#[test]
fn failed_update_leaves_habit_unchanged() {
    let mut habit = Habit::new(fields("Stretch", Recurrence::Daily)).unwrap();
    let before = habit.clone();

    let err = habit
        .update_basic_fields(HabitFields::new(
            "no",
            Category::Career,
            Recurrence::Yearly,
            Priority::Low,
        ))
        .unwrap_err();

    assert!(matches!(err, HabitValidationError::NameTooShort { .. }));
    assert_eq!(habit, before);
}

#[test]
fn habit_serialization_uses_expected_wire_fields() {
    let mut habit = Habit::new(fields("Drink water", Recurrence::Daily)).unwrap();
    habit.set_id(3);
    habit.mark_completed(date(2025, 6, 1));

    let json = serde_json::to_value(&habit).unwrap();
    assert_eq!(json["id"], 3);
    assert_eq!(json["name"], "Drink water");
    assert_eq!(json["category"], "health");
    assert_eq!(json["recurrence"], "daily");
    assert_eq!(json["priority"], "high");
    assert_eq!(json["level"], 1);
    assert_eq!(json["xp"], 20);
    assert_eq!(json["streak"], 1);
    assert_eq!(json["total_completions"], 1);
    assert_eq!(json["last_completion"], "2025-06-01");

    let decoded: Habit = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, habit);
}

#[test]
fn deserialize_rejects_xp_at_or_above_threshold() {
    let value = serde_json::json!({
        "id": 1,
        "name": "Drink water",
        "category": "health",
        "recurrence": "daily",
        "priority": "high",
        "level": 2,
        "xp": 60,
        "streak": 0,
        "total_completions": 0,
        "last_completion": null
    });

    let err = serde_json::from_value::<Habit>(value).unwrap_err();
    assert!(
        err.to_string().contains("habit xp (60) must be < level threshold (60)"),
        "unexpected error: {err}"
    );
}

#[test]
fn deserialize_rejects_level_zero() {
    let value = serde_json::json!({
        "id": 1,
        "name": "Drink water",
        "category": "health",
        "recurrence": "daily",
        "priority": "high",
        "level": 0,
        "xp": 0,
        "streak": 0,
        "total_completions": 0,
        "last_completion": null
    });

    let err = serde_json::from_value::<Habit>(value).unwrap_err();
    assert!(err.to_string().contains("habit level must be in 1..="));
}

fn stored_habit(recurrence: &str, level: u32, xp: u32) -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "name": "Plan the year",
        "category": "career",
        "recurrence": recurrence,
        "priority": "high",
        "level": level,
        "xp": xp,
        "streak": 0,
        "total_completions": 0,
        "last_completion": null
    })
}

#[test]
fn deserialize_rejects_level_whose_threshold_overflows() {
    for level in [MAX_LEVEL + 1, u32::MAX] {
        let err = serde_json::from_value::<Habit>(stored_habit("yearly", level, u32::MAX - 1))
            .unwrap_err();
        assert!(err.to_string().contains("habit level must be in 1..="));
    }
}

#[test]
fn completion_at_level_cap_keeps_xp_below_threshold() {
    let required = xp_required_for_level(MAX_LEVEL);
    let mut habit =
        serde_json::from_value::<Habit>(stored_habit("yearly", MAX_LEVEL, required - 1)).unwrap();

    let outcome = habit.mark_completed(date(2025, 1, 1));

    assert!(outcome.is_completed());
    assert_eq!(habit.level(), MAX_LEVEL);
    assert_eq!(habit.xp(), required - 1);
    assert_eq!(habit.total_completions(), 1);
}

#[test]
fn completion_below_level_cap_keeps_all_xp() {
    let level = MAX_LEVEL - 1;
    let mut habit =
        serde_json::from_value::<Habit>(stored_habit("daily", level, xp_required_for_level(level) - 5))
            .unwrap();

    habit.mark_completed(date(2025, 1, 1));

    assert_eq!(habit.level(), MAX_LEVEL);
    assert_eq!(habit.xp(), 15);
}

#[test]
fn completion_outcome_serializes_with_status_tag() {
    let json = serde_json::to_value(CompletionOutcome::Completed {
        xp_gained: 20,
        levels_gained: 0,
    })
    .unwrap();
    assert_eq!(json["status"], "completed");
    assert_eq!(json["xp_gained"], 20);

    let json = serde_json::to_value(CompletionOutcome::AlreadyCompletedThisPeriod).unwrap();
    assert_eq!(json["status"], "already_completed_this_period");
}

#[test]
fn display_shows_progress_summary() {
    let mut habit = Habit::new(fields("Drink water", Recurrence::Daily)).unwrap();
    habit.mark_completed(date(2025, 6, 1));

    assert_eq!(
        habit.to_string(),
        "Drink water | level 1 | xp 20/30 | streak 1 | Daily | High priority"
    );
}
