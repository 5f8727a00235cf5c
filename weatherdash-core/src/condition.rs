//! Presentation categories derived from OpenWeather condition codes.
//!
//! See <https://openweathermap.org/weather-conditions> for the code table.

use serde::Serialize;

/// Icon shown next to a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionIcon {
    Lightning,
    Drizzle,
    Rain,
    Snow,
    Fog,
    Sun,
    SunBehindCloud,
    Cloud,
}

impl ConditionIcon {
    /// Codes outside the known families (e.g. the unused 4xx block) fall back to [`Self::Sun`].
    pub fn from_code(code: u32) -> Self {
        match code {
            200..=299 => Self::Lightning,
            300..=399 => Self::Drizzle,
            500..=599 => Self::Rain,
            600..=699 => Self::Snow,
            700..=799 => Self::Fog,
            800 => Self::Sun,
            801 => Self::SunBehindCloud,
            802..=899 => Self::Cloud,
            _ => Self::Sun,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Lightning => "⛈",
            Self::Drizzle => "🌦",
            Self::Rain => "🌧",
            Self::Snow => "🌨",
            Self::Fog => "🌫",
            Self::Sun => "☀",
            Self::SunBehindCloud => "⛅",
            Self::Cloud => "☁",
        }
    }
}

/// Backdrop and particle theme of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Thunderstorm,
    Rain,
    Snow,
    Mist,
    Clear,
    Cloudy,
}

const THUNDERSTORM_BACKDROPS: [&str; 4] = [
    "https://images.unsplash.com/photo-1605727216801-e27ce1d0cc28",
    "https://images.unsplash.com/photo-1594156596782-656c93e4d504",
    "https://images.unsplash.com/photo-1461511669078-d46bf351cd6e",
    "https://images.unsplash.com/photo-1492011221367-f47e3ccd77a0",
];

const RAIN_BACKDROPS: [&str; 4] = [
    "https://images.unsplash.com/photo-1519692933481-e162a57d6721",
    "https://images.unsplash.com/photo-1428592953211-077101b2021b",
    "https://images.unsplash.com/photo-1515694346937-94d85e41e6f0",
    "https://images.unsplash.com/photo-1501691223387-dd0500403074",
];

const SNOW_BACKDROPS: [&str; 4] = [
    "https://images.unsplash.com/photo-1491002052546-bf38f186af56",
    "https://images.unsplash.com/photo-1516431883744-8ea66f1053f1",
    "https://images.unsplash.com/photo-1478265409131-1f65c88f965c",
    "https://images.unsplash.com/photo-1551582045-6ec9c11d8697",
];

const MIST_BACKDROPS: [&str; 4] = [
    "https://images.unsplash.com/photo-1485236715568-ddc5ee6ca227",
    "https://images.unsplash.com/photo-1543968996-ee822b8176ba",
    "https://images.unsplash.com/photo-1482841628122-9080d44bb807",
    "https://images.unsplash.com/photo-1492273840898-6102ad35701e",
];

const CLEAR_BACKDROPS: [&str; 4] = [
    "https://images.unsplash.com/photo-1601297183305-6df142704ea2",
    "https://images.unsplash.com/photo-1464822759023-fed622ff2c3b",
    "https://images.unsplash.com/photo-1419833173245-f59e1b93f9ee",
    "https://images.unsplash.com/photo-1507525428034-b723cf961d3e",
];

const CLOUDY_BACKDROPS: [&str; 4] = [
    "https://images.unsplash.com/photo-1534088568595-a066f410bcda",
    "https://images.unsplash.com/photo-1499956827185-0d63ee78a910",
    "https://images.unsplash.com/photo-1594156596782-656c93e4d504",
    "https://images.unsplash.com/photo-1505533321630-975218a5f66f",
];

impl Theme {
    pub fn from_code(code: u32) -> Self {
        match code {
            200..=299 => Self::Thunderstorm,
            300..=599 => Self::Rain,
            600..=699 => Self::Snow,
            700..=799 => Self::Mist,
            800 => Self::Clear,
            801.. => Self::Cloudy,
            _ => Self::Clear,
        }
    }

    /// Theme used before any conditions have loaded.
    pub fn from_optional_code(code: Option<u32>) -> Self {
        code.map_or(Self::Clear, Self::from_code)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Thunderstorm => "thunderstorm",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Mist => "mist",
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
        }
    }

    /// Number of animated background particles.
    pub fn particle_count(self) -> usize {
        match self {
            Self::Rain => 50,
            Self::Snow => 40,
            Self::Mist => 30,
            _ => 15,
        }
    }

    pub fn backdrops(self) -> &'static [&'static str] {
        match self {
            Self::Thunderstorm => &THUNDERSTORM_BACKDROPS,
            Self::Rain => &RAIN_BACKDROPS,
            Self::Snow => &SNOW_BACKDROPS,
            Self::Mist => &MIST_BACKDROPS,
            Self::Clear => &CLEAR_BACKDROPS,
            Self::Cloudy => &CLOUDY_BACKDROPS,
        }
    }

    /// Backdrop photo URL for `pick`, wrapped into the theme's set and sized for a 1920px viewport.
    pub fn backdrop_url(self, pick: usize) -> String {
        let images = self.backdrops();
        format!("{}?auto=format,compress&q=70&w=1920", images[pick % images.len()])
    }
}

/// Decoration of the dashboard for one set of conditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Backdrop {
    pub theme: Theme,
    pub particles: usize,
    pub image: String,
}

impl Backdrop {
    /// `code` is the primary condition code, if any conditions have loaded.
    /// `pick` chooses the photo within the theme's set.
    pub fn new(code: Option<u32>, pick: usize) -> Self {
        let theme = Theme::from_optional_code(code);
        Self {
            theme,
            particles: theme.particle_count(),
            image: theme.backdrop_url(pick),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_distinguishes_drizzle_from_rain_and_few_clouds() {
        assert_eq!(ConditionIcon::from_code(211), ConditionIcon::Lightning);
        assert_eq!(ConditionIcon::from_code(310), ConditionIcon::Drizzle);
        assert_eq!(ConditionIcon::from_code(502), ConditionIcon::Rain);
        assert_eq!(ConditionIcon::from_code(601), ConditionIcon::Snow);
        assert_eq!(ConditionIcon::from_code(741), ConditionIcon::Fog);
        assert_eq!(ConditionIcon::from_code(800), ConditionIcon::Sun);
        assert_eq!(ConditionIcon::from_code(801), ConditionIcon::SunBehindCloud);
        assert_eq!(ConditionIcon::from_code(804), ConditionIcon::Cloud);
    }

    #[test]
    fn icon_defaults_to_sun_for_unknown_codes() {
        assert_eq!(ConditionIcon::from_code(0), ConditionIcon::Sun);
        assert_eq!(ConditionIcon::from_code(450), ConditionIcon::Sun);
        assert_eq!(ConditionIcon::from_code(950), ConditionIcon::Sun);
    }

    #[test]
    fn theme_ranges() {
        assert_eq!(Theme::from_code(200), Theme::Thunderstorm);
        assert_eq!(Theme::from_code(299), Theme::Thunderstorm);
        assert_eq!(Theme::from_code(300), Theme::Rain);
        assert_eq!(Theme::from_code(450), Theme::Rain);
        assert_eq!(Theme::from_code(599), Theme::Rain);
        assert_eq!(Theme::from_code(600), Theme::Snow);
        assert_eq!(Theme::from_code(701), Theme::Mist);
        assert_eq!(Theme::from_code(800), Theme::Clear);
        assert_eq!(Theme::from_code(801), Theme::Cloudy);
        assert_eq!(Theme::from_code(899), Theme::Cloudy);
        assert_eq!(Theme::from_code(100), Theme::Clear);
        assert_eq!(Theme::from_optional_code(None), Theme::Clear);
    }

    #[test]
    fn particle_density_per_theme() {
        assert_eq!(Theme::Rain.particle_count(), 50);
        assert_eq!(Theme::Snow.particle_count(), 40);
        assert_eq!(Theme::Mist.particle_count(), 30);
        assert_eq!(Theme::Clear.particle_count(), 15);
        assert_eq!(Theme::Thunderstorm.particle_count(), 15);
    }

    #[test]
    fn backdrop_combines_theme_particles_and_photo() {
        let backdrop = Backdrop::new(Some(502), 1);

        assert_eq!(backdrop.theme, Theme::Rain);
        assert_eq!(backdrop.particles, 50);
        assert!(backdrop.image.starts_with(RAIN_BACKDROPS[1]));

        let json = serde_json::to_value(&backdrop).unwrap();
        assert_eq!(json["theme"], "rain");
        assert_eq!(json["particles"], 50);
    }

    #[test]
    fn backdrop_before_load_is_clear() {
        let backdrop = Backdrop::new(None, 0);

        assert_eq!(backdrop.theme, Theme::Clear);
        assert_eq!(backdrop.particles, 15);
    }

    #[test]
    fn backdrop_pick_wraps_around() {
        let first = Theme::Snow.backdrop_url(0);
        assert_eq!(Theme::Snow.backdrop_url(4), first);
        assert!(first.starts_with(SNOW_BACKDROPS[0]));
        assert!(first.ends_with("w=1920"));
    }
}
