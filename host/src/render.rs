use snake_engine::{GameSnapshot, GameStatus};

const SNAKE_HEAD: char = '@';
const SNAKE_BODY: char = 'o';
const FOOD: char = '*';
const EMPTY: char = '.';

/// Text dump of a snapshot, one line per grid row.
pub fn render_board(snapshot: &GameSnapshot) -> String {
    let columns = snapshot.grid.columns() as usize;
    let mut out = String::with_capacity((columns + 1) * snapshot.grid.rows() as usize);
    let head = snapshot.snake.head();

    for cell in snapshot.grid.cells() {
        let symbol = if cell == head {
            SNAKE_HEAD
        } else if snapshot.is_snake(cell) {
            SNAKE_BODY
        } else if snapshot.is_food(cell) {
            FOOD
        } else {
            EMPTY
        };
        out.push(symbol);
        if cell.x as usize == columns - 1 {
            out.push('\n');
        }
    }
    out
}

pub fn status_line(snapshot: &GameSnapshot) -> String {
    let food = snapshot
        .food
        .map(|cell| cell.to_string())
        .unwrap_or_else(|| "none".to_string());
    let status = match snapshot.status {
        GameStatus::Running => "running".to_string(),
        GameStatus::GameOver(reason) => format!("game over ({})", reason),
    };
    format!(
        "tick {} | head {} | length {} | food {} | score {} | {}",
        snapshot.tick,
        snapshot.snake.head(),
        snapshot.snake.len(),
        food,
        snapshot.score,
        status
    )
}
