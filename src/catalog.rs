//! Read-only catalog of sponsored content and video ads.
//!
//! Catalog management belongs to an external collaborator; the service
//! only needs reward amounts and watch thresholds by id, so the entries
//! live in-process.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ContentItem {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub reward_cents: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoAd {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub reward_cents: i64,
    pub minimum_watch_seconds: u32,
}

const CONTENT_ITEMS: &[ContentItem] = &[
    ContentItem {
        id: "content_1",
        title: "Technology Trends",
        description: "Discover the latest trends in technology",
        reward_cents: 50,
    },
    ContentItem {
        id: "content_2",
        title: "Investment Tips",
        description: "How to invest your money wisely",
        reward_cents: 50,
    },
    ContentItem {
        id: "content_3",
        title: "Health and Wellness",
        description: "Stay healthy with these tips",
        reward_cents: 50,
    },
    ContentItem {
        id: "content_4",
        title: "Delicious Recipes",
        description: "Learn to cook amazing dishes",
        reward_cents: 50,
    },
];

const VIDEO_ADS: &[VideoAd] = &[
    VideoAd {
        id: "video_1",
        title: "Product Launch",
        description: "Watch the full launch announcement",
        reward_cents: 75,
        minimum_watch_seconds: 30,
    },
    VideoAd {
        id: "video_2",
        title: "Travel Destinations",
        description: "A tour of this season's destinations",
        reward_cents: 75,
        minimum_watch_seconds: 30,
    },
    VideoAd {
        id: "video_3",
        title: "Fitness Program",
        description: "A complete at-home workout program",
        reward_cents: 100,
        minimum_watch_seconds: 30,
    },
];

pub fn content_items() -> &'static [ContentItem] {
    CONTENT_ITEMS
}

pub fn video_ads() -> &'static [VideoAd] {
    VIDEO_ADS
}

pub fn find_content(id: &str) -> Option<&'static ContentItem> {
    CONTENT_ITEMS.iter().find(|item| item.id == id)
}

pub fn find_video(id: &str) -> Option<&'static VideoAd> {
    VIDEO_ADS.iter().find(|video| video.id == id)
}
