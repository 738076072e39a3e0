use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use dominoscore::game::{MatchState, MatchStatus, TeamId};
use dominoscore::hand::{Tile, MAX_PIPS};
use dominoscore::scorer::HandScore;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, columns: &[usize]) {
    for &i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn print_match(state: &MatchState) {
    print_scoreboard(state);
    print_rules(state);
    print_history(state);
}

pub fn print_scoreboard(state: &MatchState) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Team").add_attribute(Attribute::Bold),
        Cell::new("Name"),
        Cell::new("Score"),
        Cell::new("To go"),
    ]);

    let target = state.target();
    let winner = state.winner();
    for id in [TeamId::A, TeamId::B] {
        let team = state.team(id);
        let mut score = Cell::new(team.score).add_attribute(Attribute::Bold);
        if winner == Some(id) {
            score = score.fg(Color::Green);
        }
        table.add_row(vec![
            Cell::new(id),
            Cell::new(&team.name),
            score,
            Cell::new(target.saturating_sub(team.score)),
        ]);
    }
    align_right(&mut table, &[2, 3]);

    let mut round = String::new();
    if state.game_type.uses_round_bonuses() {
        round = format!(" | Round {}", state.round_number);
    }
    println!("\n🏆 Game {} (to {}){}", state.game_type, target, round);
    println!("{}", table);

    match state.status() {
        MatchStatus::Won(id) => println!("🎉 {} wins the match!", state.team(id).name),
        MatchStatus::InProgress => {}
    }
}

pub fn print_rules(state: &MatchState) {
    let rules = &state.rules;
    let on_off = |b: bool| if b { "on" } else { "off" };

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Rule").add_attribute(Attribute::Bold),
        Cell::new("Value"),
    ]);
    table.add_row(vec![
        Cell::new("Opening pass"),
        Cell::new(format!(
            "{} ({} pts)",
            on_off(rules.opening_pass_enabled),
            state.game_type.opening_pass_points()
        )),
    ]);
    table.add_row(vec![
        Cell::new("Count all hands (500)"),
        Cell::new(on_off(rules.count_all_hands_in_500)),
    ]);
    table.add_row(vec![
        Cell::new("Pase corrido"),
        Cell::new(rules.pase_corrido_points),
    ]);
    table.add_row(vec![Cell::new("Capicúa"), Cell::new(rules.capicua_points)]);
    table.add_row(vec![Cell::new("Chuchazo"), Cell::new(rules.chuchazo_points)]);
    align_right(&mut table, &[1]);

    println!("\n⚙️  House rules");
    println!("{}", table);
}

pub fn print_history(state: &MatchState) {
    if state.history.is_empty() {
        println!("\n(no hands scored yet)");
        return;
    }

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Kind"),
        Cell::new("Team"),
        Cell::new("Delta"),
        Cell::new("Detail"),
    ]);

    // Newest first, numbered by position so `correct --index` lines up.
    for (i, entry) in state.history.iter().enumerate().rev() {
        table.add_row(vec![
            Cell::new(i),
            Cell::new(entry.kind),
            Cell::new(&state.team(entry.award_team).name),
            Cell::new(format!("+{}", entry.delta)).fg(Color::Green),
            Cell::new(&entry.detail),
        ]);
    }
    align_right(&mut table, &[0, 3]);

    println!("\n📜 History");
    println!("{}", table);
}

pub fn print_hand_score(state: &MatchState, score: &HandScore) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new(format!("+{} to {}", score.delta, state.team(score.award_team).name))
            .add_attribute(Attribute::Bold),
    ]);
    for line in &score.breakdown {
        table.add_row(vec![Cell::new(line)]);
    }
    if !score.ending {
        table.add_row(vec![Cell::new("(hand continues)").fg(Color::DarkGrey)]);
    }
    println!("\n{}", table);
}

pub fn print_tile_set() {
    let set = Tile::full_set();
    let mut table = new_table();
    let mut header = vec![Cell::new("").add_attribute(Attribute::Bold)];
    header.extend((0..=MAX_PIPS).map(Cell::new));
    table.set_header(header);

    for left in 0..=MAX_PIPS {
        let mut row = vec![Cell::new(left).add_attribute(Attribute::Bold)];
        for right in 0..=MAX_PIPS {
            let cell = set
                .iter()
                .find(|t| t.left == left && t.right == right)
                .map(|t| {
                    let c = Cell::new(t);
                    if t.is_double() {
                        c.fg(Color::Yellow)
                    } else {
                        c
                    }
                })
                .unwrap_or_else(|| Cell::new(""));
            row.push(cell);
        }
        table.add_row(row);
    }

    println!("\n🁣  Double-six set ({} tiles)", set.len());
    println!("{}", table);
}
