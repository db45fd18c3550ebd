//! Fixed catalogues the generators draw from

use crate::domain::{Achievement, ChallengeCategory, Difficulty, Rarity};

pub struct AchievementDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub rarity: Rarity,
}

pub static ACHIEVEMENTS: [AchievementDef; 10] = [
    AchievementDef {
        id: "first_touch",
        title: "First Touch",
        description: "Complete your first challenge",
        icon: "🌱",
        rarity: Rarity::Common,
    },
    AchievementDef {
        id: "grass_whale",
        title: "Grass Whale",
        description: "Stake over $100",
        icon: "🐋",
        rarity: Rarity::Rare,
    },
    AchievementDef {
        id: "streak_warrior",
        title: "Streak Warrior",
        description: "Maintain a 10-day streak",
        icon: "🔥",
        rarity: Rarity::Epic,
    },
    AchievementDef {
        id: "nature_photographer",
        title: "Nature Photographer",
        description: "Upload 25 photos",
        icon: "📸",
        rarity: Rarity::Rare,
    },
    AchievementDef {
        id: "community_champion",
        title: "Community Champion",
        description: "Get 100 photo votes",
        icon: "👑",
        rarity: Rarity::Legendary,
    },
    AchievementDef {
        id: "early_adopter",
        title: "Early Adopter",
        description: "Join in the first month",
        icon: "🚀",
        rarity: Rarity::Epic,
    },
    AchievementDef {
        id: "consistent_challenger",
        title: "Consistent Challenger",
        description: "Complete 50 challenges",
        icon: "💪",
        rarity: Rarity::Epic,
    },
    AchievementDef {
        id: "social_butterfly",
        title: "Social Butterfly",
        description: "Follow 20 users",
        icon: "🦋",
        rarity: Rarity::Common,
    },
    AchievementDef {
        id: "mentor",
        title: "Mentor",
        description: "Create 10 challenges",
        icon: "🎓",
        rarity: Rarity::Rare,
    },
    AchievementDef {
        id: "perfectionist",
        title: "Perfectionist",
        description: "100% success rate with 10+ challenges",
        icon: "✨",
        rarity: Rarity::Legendary,
    },
];

impl AchievementDef {
    pub fn to_achievement(&self) -> Achievement {
        Achievement {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
            rarity: self.rarity,
            unlocked_at: None,
        }
    }
}

/// All achievements, locked
pub fn achievement_catalog() -> Vec<Achievement> {
    ACHIEVEMENTS.iter().map(AchievementDef::to_achievement).collect()
}

pub fn find_achievement(id: &str) -> Option<&'static AchievementDef> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

pub const SAMPLE_PHOTOS: [&str; 8] = [
    "https://images.pexels.com/photos/417074/pexels-photo-417074.jpeg?auto=compress&cs=tinysrgb&w=800",
    "https://images.pexels.com/photos/346529/pexels-photo-346529.jpeg?auto=compress&cs=tinysrgb&w=800",
    "https://images.pexels.com/photos/414612/pexels-photo-414612.jpeg?auto=compress&cs=tinysrgb&w=800",
    "https://images.pexels.com/photos/1450361/pexels-photo-1450361.jpeg?auto=compress&cs=tinysrgb&w=800",
    "https://images.pexels.com/photos/2662116/pexels-photo-2662116.jpeg?auto=compress&cs=tinysrgb&w=800",
    "https://images.pexels.com/photos/1841841/pexels-photo-1841841.jpeg?auto=compress&cs=tinysrgb&w=800",
    "https://images.pexels.com/photos/1679618/pexels-photo-1679618.jpeg?auto=compress&cs=tinysrgb&w=800",
    "https://images.pexels.com/photos/2387418/pexels-photo-2387418.jpeg?auto=compress&cs=tinysrgb&w=800",
];

pub const AVATAR_URLS: [&str; 8] = [
    "https://images.pexels.com/photos/91227/pexels-photo-91227.jpeg?auto=compress&cs=tinysrgb&w=150",
    "https://images.pexels.com/photos/415829/pexels-photo-415829.jpeg?auto=compress&cs=tinysrgb&w=150",
    "https://images.pexels.com/photos/774909/pexels-photo-774909.jpeg?auto=compress&cs=tinysrgb&w=150",
    "https://images.pexels.com/photos/1222271/pexels-photo-1222271.jpeg?auto=compress&cs=tinysrgb&w=150",
    "https://images.pexels.com/photos/1239291/pexels-photo-1239291.jpeg?auto=compress&cs=tinysrgb&w=150",
    "https://images.pexels.com/photos/1516680/pexels-photo-1516680.jpeg?auto=compress&cs=tinysrgb&w=150",
    "https://images.pexels.com/photos/1674752/pexels-photo-1674752.jpeg?auto=compress&cs=tinysrgb&w=150",
    "https://images.pexels.com/photos/1681010/pexels-photo-1681010.jpeg?auto=compress&cs=tinysrgb&w=150",
];

pub const PHOTO_DESCRIPTIONS: [&str; 5] = [
    "Beautiful morning in nature!",
    "Challenge completed successfully 💪",
    "Nothing beats fresh air and exercise",
    "Feeling refreshed and energized",
    "Touch grass mission accomplished!",
];

pub const COMMENT_TEXTS: [&str; 6] = [
    "Good luck everyone, see you outside!",
    "Did this last week, the first hour is the hardest.",
    "Anyone doing this near a park? Let's meet up.",
    "Love this one. Count me in 🌿",
    "Forgot how good fresh air feels.",
    "Proof photo incoming tomorrow morning.",
];

pub const USERNAME_ADJECTIVES: [&str; 12] = [
    "Grass", "Trail", "Forest", "Sunny", "Wild", "Mossy", "River", "Summit", "Meadow", "Breezy",
    "Cedar", "Pebble",
];

pub const USERNAME_NOUNS: [&str; 10] = [
    "Toucher", "Walker", "Runner", "Hiker", "Explorer", "Wanderer", "Seeker", "Ranger", "Dreamer",
    "Rover",
];

/// Seed for a family of generated challenges
pub struct ChallengeTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub category: ChallengeCategory,
    pub difficulty: Difficulty,
    pub rules: [&'static str; 4],
    pub tags: [&'static str; 4],
}

pub const CHALLENGE_TEMPLATES: [ChallengeTemplate; 6] = [
    ChallengeTemplate {
        title: "Touch Grass - 2 Hour Digital Detox",
        description: "Put your phone in airplane mode and spend 2 hours outside without any digital devices. Take a photo of yourself in nature to prove completion.",
        category: ChallengeCategory::Detox,
        difficulty: Difficulty::Easy,
        rules: [
            "Phone must be in airplane mode or turned off",
            "Stay outside for the full 2 hours",
            "Take a photo with timestamp to verify",
            "No smartwatches or digital devices allowed",
        ],
        tags: ["beginner", "detox", "nature", "quick"],
    },
    ChallengeTemplate {
        title: "5K Morning Run Challenge",
        description: "Complete a 5K run before 9 AM and upload GPS tracking proof. Must be completed outdoors, not on a treadmill.",
        category: ChallengeCategory::Fitness,
        difficulty: Difficulty::Medium,
        rules: [
            "Must be completed before 9 AM",
            "Outdoor run only - no treadmills",
            "Upload GPS tracking screenshot",
            "Photo at start and finish location",
        ],
        tags: ["fitness", "morning", "running", "cardio"],
    },
    ChallengeTemplate {
        title: "Sunrise Photography Mission",
        description: "Wake up early to capture and share a sunrise photo from an outdoor location. Photo must show clear sunrise with landscape.",
        category: ChallengeCategory::Outdoor,
        difficulty: Difficulty::Easy,
        rules: [
            "Photo must be taken during actual sunrise",
            "Must include landscape/horizon",
            "Location tag required",
            "Original photo only - no filters",
        ],
        tags: ["photography", "sunrise", "early", "artistic"],
    },
    ChallengeTemplate {
        title: "24-Hour Social Media Fast",
        description: "Complete 24 hours without checking any social media platforms. Submit proof of screen time settings showing zero usage.",
        category: ChallengeCategory::Detox,
        difficulty: Difficulty::Hard,
        rules: [
            "No social media for 24 hours straight",
            "Screenshot screen time at start and end",
            "Delete apps or use app blockers",
            "Photo of yourself outdoors during the fast",
        ],
        tags: ["detox", "willpower", "mental-health", "digital"],
    },
    ChallengeTemplate {
        title: "Forest Bathing Session",
        description: "Spend 1 hour in a forest or wooded area practicing mindfulness. No phones, just you and nature.",
        category: ChallengeCategory::Mindfulness,
        difficulty: Difficulty::Easy,
        rules: [
            "Find a forest or wooded area",
            "Spend minimum 1 hour in quiet reflection",
            "No devices during the session",
            "Photo before and after for verification",
        ],
        tags: ["mindfulness", "forest", "relaxation", "zen"],
    },
    ChallengeTemplate {
        title: "Cold Water Swimming Challenge",
        description: "Take a dip in natural cold water (lake, ocean, river). Water temperature must be below 60°F/15°C.",
        category: ChallengeCategory::Adventure,
        difficulty: Difficulty::Hard,
        rules: [
            "Natural body of water only",
            "Water temp below 60°F/15°C",
            "Stay in water for at least 2 minutes",
            "Video proof of entry and exit",
        ],
        tags: ["extreme", "cold", "swimming", "brave"],
    },
];

/// Achievements that show up in generated feed events
pub const FEED_ACHIEVEMENTS: [&str; 4] = [
    "First Touch",
    "Streak Warrior",
    "Nature Photographer",
    "Grass Whale",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_achievement_ids_are_unique() {
        let ids: HashSet<_> = ACHIEVEMENTS.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), ACHIEVEMENTS.len());
        assert_eq!(find_achievement("mentor").unwrap().title, "Mentor");
        assert!(find_achievement("nope").is_none());
    }
}
