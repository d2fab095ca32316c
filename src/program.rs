use crate::models::{DayConfig, Task};

pub const TOTAL_DAYS: u32 = 10;
pub const GAUGE_SEGMENTS: usize = 5;

/// The 10-day number warm-up plan, ordered by day id.
pub static WARMUP_PLAN: [DayConfig; TOTAL_DAYS as usize] = [
    DayConfig {
        id: 1,
        title: "Day 1: Set up the profile",
        description: "Give the new number a real identity before it sends anything.",
        intensity: 10,
        tasks: &[
            Task { id: "d1-photo", text: "Upload a clear profile photo or business logo" },
            Task { id: "d1-name", text: "Set a display name that matches your business" },
            Task { id: "d1-about", text: "Write a short About line" },
        ],
    },
    DayConfig {
        id: 2,
        title: "Day 2: First conversations",
        description: "Start a handful of relaxed chats with people who know you.",
        intensity: 20,
        tasks: &[
            Task { id: "d2-save", text: "Ask 3 friends to save the number in their contacts" },
            Task { id: "d2-chat", text: "Exchange a few messages with each of them" },
            Task { id: "d2-reply", text: "Make sure every chat gets a reply back" },
        ],
    },
    DayConfig {
        id: 3,
        title: "Day 3: Join the conversation",
        description: "Show normal usage patterns in groups.",
        intensity: 30,
        tasks: &[
            Task { id: "d3-group", text: "Join one or two active groups" },
            Task { id: "d3-post", text: "Send a message in each group" },
            Task { id: "d3-react", text: "React to a few messages from others" },
        ],
    },
    DayConfig {
        id: 4,
        title: "Day 4: Rich media",
        description: "Send more than plain text so the account looks lived in.",
        intensity: 40,
        tasks: &[
            Task { id: "d4-image", text: "Send an image to two contacts" },
            Task { id: "d4-voice", text: "Record and send a short voice note" },
            Task { id: "d4-status", text: "Post a status update" },
        ],
    },
    DayConfig {
        id: 5,
        title: "Day 5: Voice calls",
        description: "Calls are a strong signal of a genuine account.",
        intensity: 50,
        tasks: &[
            Task { id: "d5-call", text: "Make a voice call of at least one minute" },
            Task { id: "d5-receive", text: "Receive a call from a saved contact" },
            Task { id: "d5-chat", text: "Keep two conversations going through the day" },
        ],
    },
    DayConfig {
        id: 6,
        title: "Day 6: Widen the circle",
        description: "Carefully grow the number of people you talk to.",
        intensity: 60,
        tasks: &[
            Task { id: "d6-new", text: "Message 5 new contacts who expect to hear from you" },
            Task { id: "d6-answers", text: "Get at least 3 of them to answer" },
            Task { id: "d6-pace", text: "Space the messages out over a few hours" },
        ],
    },
    DayConfig {
        id: 7,
        title: "Day 7: Business tools",
        description: "Fill in the business details customers will see.",
        intensity: 65,
        tasks: &[
            Task { id: "d7-hours", text: "Add opening hours and an address" },
            Task { id: "d7-catalog", text: "Add one item to the catalog" },
            Task { id: "d7-greeting", text: "Write a greeting message" },
        ],
    },
    DayConfig {
        id: 8,
        title: "Day 8: Steady rhythm",
        description: "Keep the volume up without any bursts.",
        intensity: 75,
        tasks: &[
            Task { id: "d8-ten", text: "Hold 10 conversations over the day" },
            Task { id: "d8-media", text: "Share a link or a document" },
            Task { id: "d8-status", text: "Post another status update" },
        ],
    },
    DayConfig {
        id: 9,
        title: "Day 9: Dress rehearsal",
        description: "Behave the way the number will once it is live.",
        intensity: 90,
        tasks: &[
            Task { id: "d9-template", text: "Send your standard first message to 5 warm leads" },
            Task { id: "d9-followup", text: "Follow up with everyone who replied" },
            Task { id: "d9-blocks", text: "Check that nobody reported or blocked the number" },
        ],
    },
    DayConfig {
        id: 10,
        title: "Day 10: Ready to connect",
        description: "Final checks before the number is handed to the bot.",
        intensity: 100,
        tasks: &[
            Task { id: "d10-review", text: "Review all chats from the last 9 days" },
            Task { id: "d10-backup", text: "Back up the chat history" },
            Task { id: "d10-connect", text: "Confirm the number is ready to be connected" },
        ],
    },
];

pub fn day(id: u32) -> Option<&'static DayConfig> {
    WARMUP_PLAN.iter().find(|day| day.id == id)
}

impl DayConfig {
    pub fn task_ids(&self) -> impl Iterator<Item = &'static str> {
        self.tasks.iter().map(|task| task.id)
    }

    pub fn has_task(&self, task_id: &str) -> bool {
        self.tasks.iter().any(|task| task.id == task_id)
    }

    /// Segment `index` is lit when `floor(intensity / 20) > index`.
    pub fn segment_lit(&self, index: usize) -> bool {
        usize::from(self.intensity / 20) > index
    }

    pub fn gauge(&self) -> [bool; GAUGE_SEGMENTS] {
        std::array::from_fn(|index| self.segment_lit(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn plan_ids_are_sequential() {
        let ids: Vec<u32> = WARMUP_PLAN.iter().map(|day| day.id).collect();
        assert_eq!(ids, (1..=TOTAL_DAYS).collect::<Vec<_>>());
    }

    #[test]
    fn task_ids_unique_within_each_day() {
        for day in WARMUP_PLAN.iter() {
            assert!(!day.tasks.is_empty(), "day {} has no tasks", day.id);
            let unique: HashSet<&str> = day.task_ids().collect();
            assert_eq!(unique.len(), day.tasks.len(), "duplicate task id in day {}", day.id);
            assert!(day.intensity <= 100);
        }
    }

    #[test]
    fn gauge_uses_floored_fifths() {
        let mut config = WARMUP_PLAN[0].clone();
        config.intensity = 50;
        assert_eq!(config.gauge(), [true, true, false, false, false]);
        config.intensity = 19;
        assert_eq!(config.gauge(), [false; 5]);
        config.intensity = 100;
        assert_eq!(config.gauge(), [true; 5]);
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(day(3).map(|d| d.id), Some(3));
        assert!(day(0).is_none());
        assert!(day(11).is_none());
    }
}
