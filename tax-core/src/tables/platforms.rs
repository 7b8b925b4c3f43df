use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// (id, name, fee percentage, description, icon)
pub const PLATFORMS: [(&str, &str, Decimal, &str, &str); 6] = [
    (
        "onlyfans",
        "OnlyFans",
        dec!(0.20),
        "Keeps 20% of subscriptions, tips, and pay-per-view sales",
        "💙",
    ),
    (
        "fansly",
        "Fansly",
        dec!(0.20),
        "Keeps 20% of subscriptions and tips",
        "💜",
    ),
    (
        "patreon",
        "Patreon",
        dec!(0.08),
        "Pro plan platform fee, before payment processing",
        "🧡",
    ),
    (
        "youtube",
        "YouTube",
        dec!(0.45),
        "Partner Program keeps 45% of long-form ad revenue",
        "❤️",
    ),
    (
        "twitch",
        "Twitch",
        dec!(0.50),
        "Standard 50/50 subscription revenue split",
        "💟",
    ),
    (
        "custom",
        "Other platform",
        dec!(0),
        "Enter the fee your platform charges",
        "⚙️",
    ),
];
