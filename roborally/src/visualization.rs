use crate::Board;

/// Draws the board as a box of text, one row per y coordinate.
///
/// Occupied spaces show the player number followed by an arrow for its
/// heading, free spaces a dot. Cells are at least three columns wide and
/// grow to fit the highest player number.
pub fn visualize_board(board: &Board) -> String {
    let digits = board.players_number().saturating_sub(1).to_string().len();
    let cell = (digits + 1).max(3);

    let mut result = String::from("    ");
    for x in 0..board.width() {
        result += &format!("{:>cell$}", x);
    }
    let border = "─".repeat(cell * board.width());
    result += &format!("\n    ╭{}╮\n", border);

    for y in 0..board.height() {
        result += &format!("{:>3} │", y);
        for x in 0..board.width() {
            let occupant = board
                .get_space(x, y)
                .and_then(|space| space.player())
                .and_then(|idx| board.get_player(idx).map(|p| (idx, p.heading())));
            match occupant {
                Some((idx, heading)) => {
                    result += &format!("{:>width$}{}", idx, heading.arrow(), width = cell - 1)
                }
                None => result += &format!("{:>cell$}", "·"),
            }
        }
        result += "│\n";
    }

    result += &format!("    ╰{}╯", border);
    result
}
