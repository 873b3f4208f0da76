//! Static tutorial catalogue

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tutorial {
    pub id: u32,
    pub title: &'static str,
    pub duration: &'static str,
    pub description: &'static str,
    pub thumbnail: &'static str,
}

pub const TUTORIALS: [Tutorial; 6] = [
    Tutorial {
        id: 1,
        title: "How to Use GPS Detection",
        duration: "3 min",
        description: "Learn how auto-detection works",
        thumbnail: "🗺️",
    },
    Tutorial {
        id: 2,
        title: "Understanding Soil Types",
        duration: "5 min",
        description: "Know your soil for better crops",
        thumbnail: "🏞️",
    },
    Tutorial {
        id: 3,
        title: "Reading Weather Forecasts",
        duration: "4 min",
        description: "Use weather data effectively",
        thumbnail: "☁️",
    },
    Tutorial {
        id: 4,
        title: "Market Price Trends",
        duration: "6 min",
        description: "Maximize your profits",
        thumbnail: "💰",
    },
    Tutorial {
        id: 5,
        title: "Using Manual Input Mode",
        duration: "4 min",
        description: "Enter NPK values correctly",
        thumbnail: "✏️",
    },
    Tutorial {
        id: 6,
        title: "Interpreting Results",
        duration: "5 min",
        description: "Understand your recommendations",
        thumbnail: "📊",
    },
];

pub fn tutorials() -> &'static [Tutorial] {
    &TUTORIALS
}
