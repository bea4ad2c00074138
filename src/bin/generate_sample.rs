use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.next_u64() as usize % items.len()]
    }
}

// ---------------------------------------------------------------------------
// Fixtures shared by all tables
// ---------------------------------------------------------------------------

const FIRST_NAMES: &[&str] = &["Hank", "Ted", "Willie", "Mickey", "Stan", "Roberto", "Jackie", "Lou"];
const LAST_NAMES: &[&str] = &["Aaron", "Williams", "Mays", "Mantle", "Musial", "Clemente", "Robinson", "Gehrig"];
const TEAMS: &[(&str, &str, &str)] = &[
    ("BOS", "AL", "Boston Red Sox"),
    ("NYA", "AL", "New York Yankees"),
    ("SLN", "NL", "St. Louis Cardinals"),
    ("PIT", "NL", "Pittsburgh Pirates"),
];
const POSITIONS: &[&str] = &["P", "C", "1B", "2B", "3B", "SS", "OF"];
const YEARS: std::ops::RangeInclusive<u64> = 2015..=2019;

struct Player {
    id: String,
    first: String,
    last: String,
    birth_year: u64,
    team: usize,
    pos: &'static str,
}

fn roster(rng: &mut SimpleRng) -> Vec<Player> {
    let mut players = Vec::new();
    for (i, last) in LAST_NAMES.iter().enumerate() {
        let first = FIRST_NAMES[i];
        let stem: String = last.to_lowercase().chars().take(5).collect();
        let prefix: String = first.to_lowercase().chars().take(2).collect();
        players.push(Player {
            id: format!("{stem}{prefix}01"),
            first: first.to_string(),
            last: last.to_string(),
            birth_year: rng.range(1985, 1995),
            team: i % TEAMS.len(),
            pos: rng.pick(POSITIONS),
        });
    }
    players
}

/// Write one CSV file with `headers` and one row per entry in `rows`.
fn write_csv(dir: &Path, file: &str, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
    let path = dir.join(file);
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    println!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Build a row by naming a value for some headers; the rest get a random count.
fn row(headers: &[&str], rng: &mut SimpleRng, mut cell: impl FnMut(&str) -> Option<String>) -> Vec<String> {
    headers
        .iter()
        .map(|h| cell(h).unwrap_or_else(|| rng.range(0, 40).to_string()))
        .collect()
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

fn batting(dir: &Path, players: &[Player], rng: &mut SimpleRng) -> Result<()> {
    let headers = [
        "playerID", "yearID", "stint", "teamID", "lgID", "G", "AB", "R", "H", "2B", "3B", "HR",
        "RBI", "SB", "CS", "BB", "SO", "IBB", "HBP", "SH", "SF", "GIDP",
    ];
    let mut rows = Vec::new();
    for year in YEARS {
        for p in players {
            let ab = rng.range(150, 600);
            let hits = ab * rng.range(200, 330) / 1000;
            let (team, league, _) = TEAMS[p.team];
            rows.push(row(&headers, rng, |h| match h {
                "playerID" => Some(p.id.clone()),
                "yearID" => Some(year.to_string()),
                "stint" => Some("1".into()),
                "teamID" => Some(team.into()),
                "lgID" => Some(league.into()),
                "AB" => Some(ab.to_string()),
                "H" => Some(hits.to_string()),
                // Intentional walks are not recorded for every season.
                "IBB" if year == 2015 => Some(String::new()),
                _ => None,
            }));
        }
    }
    write_csv(dir, "Batting.csv", &headers, &rows)
}

fn fielding(dir: &Path, players: &[Player], rng: &mut SimpleRng) -> Result<()> {
    let headers = [
        "playerID", "yearID", "stint", "teamID", "lgID", "POS", "G", "GS", "InnOuts", "PO", "A",
        "E", "DP", "PB", "WP", "SB", "CS", "ZR",
    ];
    let mut rows = Vec::new();
    for year in YEARS {
        for p in players {
            let (team, league, _) = TEAMS[p.team];
            rows.push(row(&headers, rng, |h| match h {
                "playerID" => Some(p.id.clone()),
                "yearID" => Some(year.to_string()),
                "stint" => Some("1".into()),
                "teamID" => Some(team.into()),
                "lgID" => Some(league.into()),
                "POS" => Some(p.pos.into()),
                "PB" | "WP" | "ZR" if p.pos != "C" => Some(String::new()),
                _ => None,
            }));
        }
    }
    write_csv(dir, "Fielding.csv", &headers, &rows)
}

fn people(dir: &Path, players: &[Player], rng: &mut SimpleRng) -> Result<()> {
    let headers = [
        "playerID", "birthYear", "birthMonth", "birthDay", "birthCountry", "birthState",
        "birthCity", "deathYear", "deathMonth", "deathDay", "deathCountry", "deathState",
        "deathCity", "nameFirst", "nameLast", "nameGiven", "weight", "height", "bats", "throws",
        "debut", "finalGame", "retroID", "bbrefID",
    ];
    let mut rows = Vec::new();
    for p in players {
        let month = rng.range(1, 12);
        let day = rng.range(1, 28);
        let debut_year = p.birth_year + rng.range(21, 25);
        rows.push(row(&headers, rng, |h| match h {
            "playerID" | "bbrefID" => Some(p.id.clone()),
            "retroID" => Some(format!("{}{}001", &p.last.to_lowercase()[..4], &p.first.to_lowercase()[..1])),
            "birthYear" => Some(p.birth_year.to_string()),
            "birthMonth" => Some(month.to_string()),
            "birthDay" => Some(day.to_string()),
            "birthCountry" => Some("USA".into()),
            "birthState" => Some("CA".into()),
            "birthCity" => Some("San Diego".into()),
            h if h.starts_with("death") => Some(String::new()),
            "nameFirst" => Some(p.first.clone()),
            "nameLast" => Some(p.last.clone()),
            "nameGiven" => Some(format!("{} Louis", p.first)),
            "weight" => Some((180 + day * 2).to_string()),
            "height" => Some((70 + month % 6).to_string()),
            "bats" | "throws" => Some(if month % 3 == 0 { "L" } else { "R" }.into()),
            "debut" => Some(format!("{debut_year}-04-{:02}", day)),
            "finalGame" => Some(format!("2019-09-{:02}", day)),
            _ => None,
        }));
    }
    write_csv(dir, "People.csv", &headers, &rows)
}

fn stats(dir: &Path, players: &[Player], rng: &mut SimpleRng) -> Result<()> {
    // Exported with a trailing delimiter, which leaves a blank header at index 14.
    let headers = [
        "last_name, first_name", "player_id", "year", "player_age", "ab", "pa", "hit",
        "home_run", "batting_avg", "slg_percent", "on_base_percent", "isolated_power", "b_lob",
        "woba", "",
    ];
    let mut rows = Vec::new();
    for year in YEARS {
        for (id, p) in players.iter().enumerate() {
            let ab = rng.range(300, 600);
            let hits = ab * rng.range(200, 330) / 1000;
            let avg = hits as f64 / ab as f64;
            let slg = avg + rng.range(50, 250) as f64 / 1000.0;
            rows.push(row(&headers, rng, |h| match h {
                "last_name, first_name" => Some(format!("{}, {}", p.last, p.first)),
                "player_id" => Some((500_000 + id).to_string()),
                "year" => Some(year.to_string()),
                "player_age" => Some((year - p.birth_year).to_string()),
                "ab" => Some(ab.to_string()),
                "pa" => Some((ab + ab / 10).to_string()),
                "hit" => Some(hits.to_string()),
                "batting_avg" => Some(format!("{avg:.3}")),
                "slg_percent" => Some(format!("{slg:.3}")),
                "on_base_percent" => Some(format!("{:.3}", avg + 0.06)),
                "isolated_power" => Some(format!("{:.3}", slg - avg)),
                "woba" => Some(format!("{:.3}", avg + 0.08)),
                "" => Some(String::new()),
                _ => None,
            }));
        }
    }
    write_csv(dir, "stats.csv", &headers, &rows)
}

fn hall_of_fame(dir: &Path, players: &[Player], rng: &mut SimpleRng) -> Result<()> {
    let headers = [
        "playerID", "yearid", "votedBy", "ballots", "needed", "votes", "inducted", "category",
        "needed_note",
    ];
    let mut rows = Vec::new();
    for p in players.iter().take(4) {
        let votes = rng.range(100, 420);
        rows.push(row(&headers, rng, |h| match h {
            "playerID" => Some(p.id.clone()),
            "yearid" => Some("2019".into()),
            "votedBy" => Some("BBWAA".into()),
            "ballots" => Some("425".into()),
            "needed" => Some("319".into()),
            "votes" => Some(votes.to_string()),
            "inducted" => Some(if votes >= 319 { "Y" } else { "N" }.into()),
            "category" => Some("Player".into()),
            "needed_note" => Some(String::new()),
            _ => None,
        }));
    }
    write_csv(dir, "HallOfFame.csv", &headers, &rows)
}

fn teams(dir: &Path, rng: &mut SimpleRng) -> Result<()> {
    let headers = [
        "yearID", "lgID", "teamID", "franchID", "divID", "Rank", "G", "Ghome", "W", "L", "DivWin",
        "WCWin", "LgWin", "WSWin", "R", "AB", "H", "2B", "3B", "HR", "BB", "SO", "SB", "CS",
        "HBP", "SF", "RA", "ER", "ERA", "CG", "SHO", "SV", "IPouts", "HA", "HRA", "BBA", "SOA",
        "E", "DP", "FP", "name", "park", "attendance", "BPF", "PPF", "teamIDBR",
        "teamIDlahman45", "teamIDretro",
    ];
    let mut rows = Vec::new();
    for year in YEARS {
        for (rank, (team, league, name)) in TEAMS.iter().enumerate() {
            let wins = rng.range(60, 100);
            rows.push(row(&headers, rng, |h| match h {
                "yearID" => Some(year.to_string()),
                "lgID" => Some(league.to_string()),
                "teamID" | "franchID" | "teamIDBR" | "teamIDlahman45" | "teamIDretro" => {
                    Some(team.to_string())
                }
                "divID" => Some("E".into()),
                "Rank" => Some((rank + 1).to_string()),
                "G" => Some("162".into()),
                "Ghome" => Some("81".into()),
                "W" => Some(wins.to_string()),
                "L" => Some((162 - wins).to_string()),
                "DivWin" | "WCWin" | "LgWin" | "WSWin" => Some("N".into()),
                "ERA" => Some(format!("{:.2}", 3.0 + (100 - wins) as f64 / 25.0)),
                "FP" => Some("0.98".into()),
                "name" => Some(name.to_string()),
                "park" => Some(format!("{name} Park")),
                "attendance" => Some((2_000_000 + wins * 10_000).to_string()),
                "BPF" | "PPF" => Some("100".into()),
                _ => None,
            }));
        }
    }
    write_csv(dir, "Teams.csv", &headers, &rows)
}

fn gamelogs(dir: &Path, rng: &mut SimpleRng) -> Result<()> {
    let headers = [
        "date", "number_of_game", "day_of_week", "v_name", "v_league", "v_game_number", "h_name",
        "h_league", "h_game_number", "v_score", "h_score", "length_outs", "day_night",
        "completion", "forefeit", "protest", "park_id", "attendance", "length_minutes",
    ];
    let days = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    let mut rows = Vec::new();
    for game in 0..20u64 {
        let (visitor, v_league, _) = TEAMS[(game % 4) as usize];
        let (home, h_league, _) = TEAMS[((game + 1) % 4) as usize];
        rows.push(row(&headers, rng, |h| match h {
            "date" => Some(format!("2019-06-{:02}", game + 1)),
            "number_of_game" => Some("0".into()),
            "day_of_week" => Some(days[(game % 7) as usize].into()),
            "v_name" => Some(visitor.into()),
            "v_league" => Some(v_league.into()),
            "h_name" => Some(home.into()),
            "h_league" => Some(h_league.into()),
            "v_game_number" | "h_game_number" => Some((game + 60).to_string()),
            "length_outs" => Some("54".into()),
            "day_night" => Some(if game % 3 == 0 { "D" } else { "N" }.into()),
            "completion" | "forefeit" | "protest" => Some(String::new()),
            "park_id" => Some(format!("{home}07")),
            "attendance" => Some((25_000 + game * 731).to_string()),
            "length_minutes" => Some((170 + game).to_string()),
            _ => None,
        }));
    }
    write_csv(dir, "gamelogs.csv", &headers, &rows)
}

fn main() -> Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let players = roster(&mut rng);

    batting(&out_dir, &players, &mut rng)?;
    fielding(&out_dir, &players, &mut rng)?;
    people(&out_dir, &players, &mut rng)?;
    stats(&out_dir, &players, &mut rng)?;
    hall_of_fame(&out_dir, &players, &mut rng)?;
    teams(&out_dir, &mut rng)?;
    gamelogs(&out_dir, &mut rng)?;

    Ok(())
}
