//! Screen layouts for the 16x2 display.

use core::fmt::Write as _;

use crate::hw::{COLS, Display, Glyph, Target};
use crate::menu::MenuOption;

type Line = heapless::String<{ COLS as usize }>;

fn line(args: core::fmt::Arguments<'_>) -> Line {
    let mut buf = Line::new();
    // Layouts are sized for the display; a piece that would overflow is dropped.
    buf.write_fmt(args).ok();
    buf
}

/// First layout that fits on one row. Numbers stay whole: a wide value
/// falls through to a shorter layout instead of losing digits.
fn first_fit<const N: usize>(layouts: [core::fmt::Arguments<'_>; N]) -> Line {
    for args in layouts {
        let mut buf = Line::new();
        if buf.write_fmt(args).is_ok() {
            return buf;
        }
    }
    Line::new()
}

/// "Total: n", or just the number when it is too wide for the label.
fn total_line(total: i32) -> Line {
    first_fit([format_args!("Total: {}", total), format_args!("{}", total)])
}

pub fn splash<D: Display>(display: &mut D) {
    display.clear();
    display.set_cursor(2, 0);
    display.draw_glyph(Glyph::Sword);
    display.print(" EN GARDE! ");
    display.draw_glyph(Glyph::Sword);
    display.set_cursor(1, 1);
    display.print("Reflex trainer");
}

fn menu_label(option: MenuOption, total_rounds: u8) -> Line {
    match option {
        MenuOption::Start => line(format_args!("Start game")),
        MenuOption::Rounds => line(format_args!("Rounds: < {} >", total_rounds)),
        MenuOption::HighScore => line(format_args!("High score")),
    }
}

/// Two visible rows with the arrow glyph on the selected one.
pub fn menu<D: Display>(display: &mut D, selected: MenuOption, total_rounds: u8) {
    let offset = selected.scroll_offset();
    display.clear();
    for (row, option) in MenuOption::ALL.iter().skip(offset).take(2).enumerate() {
        let row = row as u8;
        if *option == selected {
            display.set_cursor(0, row);
            display.draw_glyph(Glyph::Arrow);
        }
        display.set_cursor(2, row);
        display.print(&menu_label(*option, total_rounds));
    }
}

pub fn en_garde<D: Display>(display: &mut D, round: u8, total_rounds: u8, score: i32) {
    display.clear();
    display.set_cursor(0, 0);
    display.print(&first_fit([
        format_args!("{}/{} Pts:{}", round, total_rounds, score),
        format_args!("{}/{} {}", round, total_rounds, score),
        format_args!("{}", score),
    ]));
    display.set_cursor(0, 1);
    display.draw_glyph(Glyph::Sword);
    display.print(" En garde...");
}

pub fn target<D: Display>(display: &mut D, target: Target) {
    display.clear();
    display.set_cursor(0, 0);
    display.print("   >> NOW! <<");
    let text = match target {
        Target::Left => line(format_args!("<<< {}", target.name())),
        Target::Center => line(format_args!("   ^ {} ^", target.name())),
        Target::Right => line(format_args!("     {} >>>", target.name())),
    };
    display.set_cursor(0, 1);
    display.print(&text);
}

pub fn hit<D: Display>(display: &mut D, reaction_ms: u32, celebrated: bool, total: i32) {
    display.clear();
    display.set_cursor(0, 0);
    display.draw_glyph(Glyph::Clock);
    let verdict = if celebrated { "Lightning!" } else { "Touche!" };
    display.print(&line(format_args!("{}ms {}", reaction_ms, verdict)));
    display.set_cursor(0, 1);
    display.print(&total_line(total));
}

pub fn miss<D: Display>(display: &mut D, penalty: i32, total: i32) {
    display.clear();
    display.set_cursor(0, 0);
    display.print(&line(format_args!("Wrong! -{}", penalty)));
    display.set_cursor(0, 1);
    display.print(&total_line(total));
}

pub fn false_start<D: Display>(display: &mut D, penalty: i32) {
    display.clear();
    display.set_cursor(0, 0);
    display.print("False start!");
    display.set_cursor(0, 1);
    display.print(&line(format_args!("Penalty: -{}", penalty)));
}

pub fn cancelled<D: Display>(display: &mut D) {
    display.clear();
    display.set_cursor(0, 0);
    display.print("Game cancelled");
    display.set_cursor(0, 1);
    display.print("Back to menu");
}

pub fn new_record<D: Display>(display: &mut D, score: i32) {
    display.clear();
    display.set_cursor(0, 0);
    display.draw_glyph(Glyph::Trophy);
    display.print(" New record!");
    display.set_cursor(0, 1);
    display.print(&first_fit([format_args!("Score: {}", score), format_args!("{}", score)]));
}

pub fn game_over<D: Display>(display: &mut D, total: i32) {
    display.clear();
    display.set_cursor(0, 0);
    display.print("Game over");
    display.set_cursor(0, 1);
    display.print(&total_line(total));
}

pub fn high_score<D: Display>(display: &mut D, high: i32) {
    display.clear();
    display.set_cursor(0, 0);
    display.draw_glyph(Glyph::Trophy);
    display.print(" High score");
    display.set_cursor(0, 1);
    display.print(&line(format_args!("{}", high)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, TextGrid};

    #[test]
    fn menu_marks_selected_row() {
        let mut grid = TextGrid::new();
        menu(&mut grid, MenuOption::Rounds, 10);
        assert_eq!(grid.row_text(0).as_str(), "  Start game");
        assert_eq!(grid.row_text(1).as_str(), "# Rounds: < 10 >");
        assert_eq!(grid.cell(0, 1), Cell::Glyph(Glyph::Arrow));
        assert_eq!(grid.cell(0, 0), Cell::Char(b' '));
    }

    #[test]
    fn menu_scrolls_for_last_option() {
        let mut grid = TextGrid::new();
        menu(&mut grid, MenuOption::HighScore, 10);
        assert_eq!(grid.row_text(0).as_str(), "  Rounds: < 10 >");
        assert_eq!(grid.row_text(1).as_str(), "# High score");
    }

    #[test]
    fn en_garde_fits_extreme_values() {
        let mut grid = TextGrid::new();
        en_garde(&mut grid, 99, 99, -99_999);
        assert_eq!(grid.row_text(0).as_str(), "99/99 Pts:-99999");
        assert_eq!(grid.row_text(1).as_str(), "# En garde...");
    }

    #[test]
    fn en_garde_keeps_wide_scores_whole() {
        let mut grid = TextGrid::new();
        en_garde(&mut grid, 99, 99, -100_000);
        assert_eq!(grid.row_text(0).as_str(), "99/99 -100000");

        en_garde(&mut grid, 99, 99, i32::MIN);
        assert_eq!(grid.row_text(0).as_str(), "-2147483648");
    }

    #[test]
    fn totals_drop_the_label_before_digits() {
        let mut grid = TextGrid::new();
        game_over(&mut grid, -123_456_789);
        assert_eq!(grid.row_text(1).as_str(), "-123456789");

        miss(&mut grid, 200, -1_000);
        assert_eq!(grid.row_text(1).as_str(), "Total: -1000");

        new_record(&mut grid, i32::MAX);
        assert_eq!(grid.row_text(1).as_str(), "2147483647");
    }

    #[test]
    fn hit_shows_reaction_time() {
        let mut grid = TextGrid::new();
        hit(&mut grid, 150, true, 850);
        assert_eq!(grid.row_text(0).as_str(), "#150ms Lightning");
        assert_eq!(grid.row_text(1).as_str(), "Total: 850");
    }

    #[test]
    fn target_names_the_side() {
        let mut grid = TextGrid::new();
        target(&mut grid, Target::Right);
        assert!(grid.contains("RIGHT >>>"));
    }
}
