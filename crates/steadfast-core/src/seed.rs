//! Built-in content: sample disciplines, wisdom, journal prompts, lessons
//! and the insights layer.

use chrono::{Days, NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, BTreeSet};

use crate::discipline::{Discipline, DisciplineCategory, Frequency};
use crate::insights::{
    Difficulty, GrowthPlan, Insight, InsightKind, PlanStep, PsychologicalProfile, Recommendation,
    Severity,
};
use crate::journal::JournalPrompt;
use crate::learning::LearningItem;
use crate::wisdom::{WisdomEntry, WisdomType};

pub const LEARNING_CATEGORIES: [&str; 5] = [
    "Leadership",
    "Productivity",
    "Finance",
    "Mental Models",
    "Performance",
];

fn created(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 1, day)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: &str,
    name: &str,
    description: &str,
    category: DisciplineCategory,
    frequency: Frequency,
    days: &[u8],
    reminder: &str,
    day: u32,
) -> Discipline {
    Discipline {
        id: id.into(),
        name: name.into(),
        description: Some(description.into()),
        category,
        frequency,
        scheduled_days: days.iter().copied().collect::<BTreeSet<u8>>(),
        duration_minutes: None,
        reminder: Some(reminder.into()),
        created_at: created(day),
        updated_at: created(day),
        last_completed_at: None,
    }
}

/// Disciplines a fresh install starts with.
pub fn sample_disciplines() -> Vec<Discipline> {
    const EVERY_DAY: &[u8] = &[0, 1, 2, 3, 4, 5, 6];
    vec![
        sample(
            "1",
            "Morning Meditation",
            "Ten quiet minutes before the day starts",
            DisciplineCategory::Mental,
            Frequency::Daily,
            EVERY_DAY,
            "07:00",
            1,
        ),
        sample(
            "2",
            "Read for 30 minutes",
            "A book that teaches you something",
            DisciplineCategory::Mental,
            Frequency::Daily,
            EVERY_DAY,
            "21:00",
            2,
        ),
        sample(
            "3",
            "Exercise",
            "At least half an hour of movement",
            DisciplineCategory::Physical,
            Frequency::Weekly,
            &[1, 3, 5],
            "17:00",
            3,
        ),
        sample(
            "4",
            "Weekly Planning",
            "Set goals and priorities for the week ahead",
            DisciplineCategory::Professional,
            Frequency::Weekly,
            &[0],
            "18:00",
            4,
        ),
        sample(
            "5",
            "Gratitude Journal",
            "Write down three things you are grateful for",
            DisciplineCategory::Emotional,
            Frequency::Daily,
            EVERY_DAY,
            "21:30",
            5,
        ),
    ]
}

fn wisdom(id: &str, kind: WisdomType, content: &str, source: Option<&str>) -> WisdomEntry {
    WisdomEntry {
        id: id.into(),
        kind,
        content: content.into(),
        source: source.map(String::from),
    }
}

pub fn wisdom_entries() -> Vec<WisdomEntry> {
    use WisdomType::*;
    vec![
        wisdom("q1", Quote, "Waste no more time arguing about what a good man should be. Be one.", Some("Marcus Aurelius")),
        wisdom("q2", Quote, "We suffer more often in imagination than in reality.", Some("Seneca")),
        wisdom("q3", Quote, "No man is free who is not master of himself.", Some("Epictetus")),
        wisdom("q4", Quote, "Well done is better than well said.", Some("Benjamin Franklin")),
        wisdom("q5", Quote, "The impediment to action advances action. What stands in the way becomes the way.", Some("Marcus Aurelius")),
        wisdom("f1", Financial, "Pay yourself first: move savings out before you spend the rest.", None),
        wisdom("f2", Financial, "Spend less than you earn and invest the difference, every month.", None),
        wisdom("f3", Financial, "An emergency fund turns a crisis into an inconvenience.", None),
        wisdom("f4", Financial, "Debt taken for things that lose value costs twice.", None),
        wisdom("p1", Parable, "Two men built houses, one on rock and one on sand. The storm came to both; only one house stood.", Some("Matthew 7")),
        wisdom("p2", Parable, "A farmer's horse ran away and the neighbours pitied him. \"Maybe,\" he said. The horse returned with three wild horses, and the neighbours cheered. \"Maybe,\" he said.", Some("Taoist tale")),
        wisdom("p3", Parable, "A boy threw stranded starfish back into the sea. Told he could not save them all, he threw another and said it mattered to that one.", None),
    ]
}

pub fn journal_prompts() -> Vec<JournalPrompt> {
    [
        "What tested your discipline today, and how did you respond?",
        "Where did you act with integrity today, even when it was hard?",
        "What are three things you are grateful for today?",
        "How did you serve someone today? How could you serve better tomorrow?",
        "What temptation did you face today, and how did you handle it?",
        "What did you avoid today that you know you should face?",
        "Which conversation today deserves a second look?",
        "What small win today is worth remembering?",
        "Where did you waste energy today?",
        "What would the person you want to become have done differently today?",
        "What did you learn about yourself this week?",
        "Who do you need to thank, and for what?",
        "What is one habit you want to start, and what is stopping you?",
        "What fear held you back recently?",
    ]
    .into_iter()
    .enumerate()
    .map(|(i, text)| JournalPrompt {
        id: (i + 1).to_string(),
        text: text.into(),
    })
    .collect()
}

fn lesson(id: &str, category: &str, title: &str, content: &str) -> LearningItem {
    LearningItem {
        id: id.into(),
        category: category.into(),
        title: title.into(),
        content: content.into(),
    }
}

pub fn learning_items() -> Vec<LearningItem> {
    vec![
        lesson("l1", "Leadership", "Decisions reveal values", "People follow what you do under pressure, not what you announce. Tradeoffs show your real priorities."),
        lesson("l2", "Leadership", "Intervene early", "A five minute conversation when someone drifts prevents weeks of misalignment later."),
        lesson("l3", "Leadership", "Lead with questions", "Asking the right question builds ownership that handing out answers never will."),
        lesson("l4", "Leadership", "Energy is contagious", "Your mood in the first minutes of a meeting sets the room. Arrive deliberately."),
        lesson("p1", "Productivity", "One top priority", "Pick the single task that would make today a success and do it before anything else."),
        lesson("p2", "Productivity", "Batch the shallow work", "Group email and small chores into fixed slots so they stop fragmenting deep work."),
        lesson("p3", "Productivity", "Two minute rule", "If it takes less than two minutes, do it now instead of tracking it."),
        lesson("p4", "Productivity", "Plan tomorrow tonight", "Writing tomorrow's first task before bed removes the morning decision."),
        lesson("f1", "Finance", "Compound interest", "Returns on returns grow slowly, then quickly. Time in the market matters more than timing."),
        lesson("f2", "Finance", "Know your burn rate", "Track what a month of your life costs. It is the number every other plan depends on."),
        lesson("f3", "Finance", "Lifestyle creep", "Let raises go to savings before they go to spending, or they will vanish."),
        lesson("f4", "Finance", "Diversify", "Do not let a single employer, stock or asset decide your future."),
        lesson("m1", "Mental Models", "Inversion", "Ask what would guarantee failure, then avoid it."),
        lesson("m2", "Mental Models", "Second-order thinking", "Ask \"and then what?\" Consequences of consequences decide most outcomes."),
        lesson("m3", "Mental Models", "Circle of competence", "Know where your knowledge ends and be careful beyond that edge."),
        lesson("m4", "Mental Models", "Opportunity cost", "Every yes is a no to something else. Name what you are giving up."),
        lesson("e1", "Performance", "Sleep first", "No routine beats a consistent seven to eight hours of sleep."),
        lesson("e2", "Performance", "Deliberate practice", "Improvement comes from focused work at the edge of your ability with quick feedback."),
        lesson("e3", "Performance", "Recovery is training", "Rest days are when the body adapts. Skipping them stalls progress."),
        lesson("e4", "Performance", "Measure what matters", "Track the one number that shows whether you are getting better."),
    ]
}

fn days_before(now: NaiveDateTime, days: u64) -> NaiveDateTime {
    now.checked_sub_days(Days::new(days)).unwrap_or(now)
}

fn days_after(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(date)
}

#[allow(clippy::too_many_arguments)]
fn insight(
    id: &str,
    title: &str,
    description: &str,
    kind: InsightKind,
    severity: Severity,
    areas: &[&str],
    created_at: NaiveDateTime,
    action: &str,
) -> Insight {
    Insight {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        kind,
        severity,
        related_areas: areas.iter().map(|a| a.to_string()).collect(),
        created_at,
        is_read: false,
        action_text: Some(action.into()),
    }
}

/// Insights dated relative to `now`.
pub fn insights(now: NaiveDateTime) -> Vec<Insight> {
    let mut list = vec![
        insight(
            "insight1",
            "Morning routine consistency",
            "Your morning disciplines are done 80% of the time. That is a strong base.",
            InsightKind::Observation,
            Severity::Positive,
            &["disciplines", "habits"],
            days_before(now, 2),
            "View details",
        ),
        insight(
            "insight2",
            "Reflection opportunity",
            "You write longer entries when reflecting on setbacks. A weekly review prompt could build on that.",
            InsightKind::Recommendation,
            Severity::Neutral,
            &["journal", "mindset"],
            days_before(now, 5),
            "Add to disciplines",
        ),
        insight(
            "insight3",
            "Evening discipline gap",
            "Evening disciplines slip more often than morning ones. Try moving a reminder earlier.",
            InsightKind::Alert,
            Severity::Warning,
            &["disciplines", "habits"],
            days_before(now, 1),
            "Adjust schedule",
        ),
        insight(
            "insight4",
            "Mental model challenge",
            "Apply one mental model to a real decision each week for the next month.",
            InsightKind::Challenge,
            Severity::Neutral,
            &["learning", "mindset"],
            days_before(now, 3),
            "Start challenge",
        ),
        insight(
            "insight5",
            "Gratitude pattern",
            "Entries are more positive on days you practice gratitude. Consider making it daily.",
            InsightKind::Recommendation,
            Severity::Positive,
            &["journal", "mental-health"],
            days_before(now, 7),
            "Add to disciplines",
        ),
        insight(
            "insight6",
            "Learning consistency",
            "No lessons were completed in the past week. Knowledge builds on small, steady steps.",
            InsightKind::Alert,
            Severity::Warning,
            &["learning"],
            days_before(now, 2),
            "Browse learning",
        ),
    ];
    list[4].is_read = true;
    list
}

#[allow(clippy::too_many_arguments)]
fn recommendation(
    id: &str,
    title: &str,
    description: &str,
    category: &str,
    difficulty: Difficulty,
    minutes: u32,
    benefits: &[&str],
    areas: &[&str],
) -> Recommendation {
    Recommendation {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        category: category.into(),
        difficulty,
        estimated_minutes: minutes,
        benefits: benefits.iter().map(|b| b.to_string()).collect(),
        related_areas: areas.iter().map(|a| a.to_string()).collect(),
    }
}

pub fn recommendations() -> Vec<Recommendation> {
    vec![
        recommendation(
            "rec1",
            "Morning meditation",
            "Start the day with ten minutes of mindfulness to sharpen focus",
            "discipline",
            Difficulty::Easy,
            10,
            &["Improved focus", "Reduced stress", "Better emotional regulation"],
            &["mental-health", "productivity"],
        ),
        recommendation(
            "rec2",
            "Gratitude journaling",
            "Write down three things you are grateful for every evening",
            "discipline",
            Difficulty::Easy,
            5,
            &["Improved mood", "Better perspective"],
            &["journal", "mental-health"],
        ),
        recommendation(
            "rec3",
            "Mental model study",
            "Learn one new mental model each week and write down where it applies",
            "learning",
            Difficulty::Medium,
            15,
            &["Clearer decisions", "Mental exercise"],
            &["learning", "mindset"],
        ),
        recommendation(
            "rec4",
            "Weekly planning session",
            "Spend thirty minutes every Sunday planning the week ahead",
            "discipline",
            Difficulty::Medium,
            30,
            &["Better organization", "Reduced stress", "Time management"],
            &["productivity", "habits"],
        ),
        recommendation(
            "rec5",
            "Deep reading practice",
            "Read for thirty minutes with no phone in the room",
            "learning",
            Difficulty::Medium,
            30,
            &["Comprehension", "Sustained focus"],
            &["learning", "productivity"],
        ),
    ]
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn psychological_profile(now: NaiveDateTime) -> PsychologicalProfile {
    let traits = [
        ("openness", 0.7),
        ("conscientiousness", 0.8),
        ("extraversion", 0.5),
        ("agreeableness", 0.6),
        ("neuroticism", 0.4),
    ]
    .into_iter()
    .map(|(name, score)| (name.to_string(), score))
    .collect::<BTreeMap<String, f64>>();

    PsychologicalProfile {
        id: "profile1".into(),
        traits,
        strengths: strings(&["Consistency", "Reflection", "Growth mindset"]),
        growth_areas: strings(&["Evening routine", "Balancing priorities"]),
        challenges: strings(&["Procrastination", "Digital distractions", "Perfectionism"]),
        motivations: strings(&[
            "Building lasting habits",
            "Deepening knowledge",
            "Personal development",
        ]),
        learning_style: "visual".into(),
        emotional_state: "positive".into(),
        motivation_level: "high".into(),
        resilience_level: "medium".into(),
        consistency_level: "medium".into(),
        created_at: days_before(now, 30),
        updated_at: now,
    }
}

fn step(id: &str, title: &str, description: &str, due_date: NaiveDate) -> PlanStep {
    PlanStep {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        due_date,
        is_completed: false,
        completed_date: None,
    }
}

/// A 30 day plan starting on `now`'s date.
pub fn growth_plan(now: NaiveDateTime) -> GrowthPlan {
    let start = now.date();
    GrowthPlan {
        id: "plan1".into(),
        title: "Consistency and focus".into(),
        description: "A 30 day plan to lock in daily disciplines and steady learning".into(),
        start_date: start,
        end_date: days_after(start, 30),
        progress: 0.1,
        focus_areas: strings(&["disciplines", "learning", "journal"]),
        milestones: vec![
            step("milestone1", "Establish a morning routine", "Follow the same morning routine every weekday", days_after(start, 7)),
            step("milestone2", "Journal consistency", "Write in your journal at least five times a week", days_after(start, 14)),
            step("milestone3", "Mental models", "Apply four mental models to real decisions", days_after(start, 21)),
            step("milestone4", "Finish a learning category", "Complete every lesson in one category", days_after(start, 28)),
        ],
        challenges: vec![
            step("challenge1", "Digital sabbath", "Spend one full day away from screens", days_after(start, 10)),
            step("challenge2", "Walking review", "Take a 30 minute walk to review your week", days_after(start, 15)),
            step("challenge3", "Gratitude marathon", "Write down 100 things you are grateful for in one sitting", days_after(start, 25)),
        ],
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_learning_category_has_items() {
        let items = learning_items();
        for category in LEARNING_CATEGORIES {
            assert!(items.iter().any(|i| i.category == category), "{category}");
        }
    }

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<_> = learning_items().into_iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), learning_items().len());
        let ids: HashSet<_> = wisdom_entries().into_iter().map(|w| w.id).collect();
        assert_eq!(ids.len(), wisdom_entries().len());
    }

    #[test]
    fn every_wisdom_type_is_present() {
        let entries = wisdom_entries();
        for kind in WisdomType::ALL {
            assert!(entries.iter().any(|e| e.kind == kind));
        }
    }

    #[test]
    fn sample_disciplines_have_schedules() {
        for d in sample_disciplines() {
            assert!(!d.scheduled_days.is_empty(), "{}", d.name);
        }
        assert_eq!(journal_prompts().len(), 14);
    }

    #[test]
    fn insight_seed_dates_follow_now() {
        let now = NaiveDate::from_ymd_opt(2023, 6, 15)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let list = insights(now);
        assert_eq!(list.len(), 6);
        assert!(list.iter().all(|i| i.created_at < now));
        assert_eq!(recommendations().len(), 5);

        let plan = growth_plan(now);
        assert_eq!(plan.start_date, now.date());
        assert!(plan
            .milestones
            .iter()
            .chain(&plan.challenges)
            .all(|s| s.due_date > plan.start_date && s.due_date < plan.end_date));
        let profile = psychological_profile(now);
        assert!(profile.traits.values().all(|v| (0.0..=1.0).contains(v)));
    }
}
