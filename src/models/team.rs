use serde::Serialize;

/// Placeholder participant for a playoff slot that is not yet decided
pub const TBD: &str = "TBD";

/// A franchise taking part in the league
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Unique short code, used as the team id on matches
    pub id: &'static str,

    /// Full display name
    pub name: &'static str,

    /// Abbreviation for tables
    pub short_name: &'static str,
}

/// Registered teams in registration order
pub const TEAMS: [Team; 10] = [
    Team {
        id: "CSK",
        name: "Chennai Super Kings",
        short_name: "CSK",
    },
    Team {
        id: "DC",
        name: "Delhi Capitals",
        short_name: "DC",
    },
    Team {
        id: "GT",
        name: "Gujarat Titans",
        short_name: "GT",
    },
    Team {
        id: "KKR",
        name: "Kolkata Knight Riders",
        short_name: "KKR",
    },
    Team {
        id: "LSG",
        name: "Lucknow Super Giants",
        short_name: "LSG",
    },
    Team {
        id: "MI",
        name: "Mumbai Indians",
        short_name: "MI",
    },
    Team {
        id: "PBKS",
        name: "Punjab Kings",
        short_name: "PBKS",
    },
    Team {
        id: "RR",
        name: "Rajasthan Royals",
        short_name: "RR",
    },
    Team {
        id: "RCB",
        name: "Royal Challengers Bangalore",
        short_name: "RCB",
    },
    Team {
        id: "SRH",
        name: "Sunrisers Hyderabad",
        short_name: "SRH",
    },
];

/// Look up a registered team by id
pub fn find_team(id: &str) -> Option<&'static Team> {
    TEAMS.iter().find(|team| team.id == id)
}

/// Short name for display, falling back to the raw id (e.g. "TBD")
pub fn short_name(id: &str) -> &str {
    find_team(id).map(|team| team.short_name).unwrap_or(id)
}
