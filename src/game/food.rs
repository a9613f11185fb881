//! Food placement on free cells

use rand::Rng;

use super::state::{Grid, Position, Snake};

/// Pick a random cell for the next food.
///
/// Cells within `margin` of the border are never chosen, and neither is any
/// cell the snake occupies. Returns `None` when no such cell is left.
pub fn place_food<R: Rng>(
    snake: &Snake,
    grid: Grid,
    margin: usize,
    rng: &mut R,
) -> Option<Position> {
    if margin.saturating_mul(2) >= grid.width.min(grid.height) {
        return None;
    }
    let area = (grid.width - margin * 2) * (grid.height - margin * 2);

    let (min_x, max_x) = (margin as i32, (grid.width - margin) as i32);
    let (min_y, max_y) = (margin as i32, (grid.height - margin) as i32);
    let covered = snake
        .body
        .iter()
        .filter(|cell| (min_x..max_x).contains(&cell.x) && (min_y..max_y).contains(&cell.y))
        .count();
    if covered >= area {
        return None;
    }

    loop {
        let candidate = Position::new(rng.gen_range(min_x..max_x), rng.gen_range(min_y..max_y));

        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_food_never_on_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = Grid::new(6, 6);
        let snake = Snake::new(Position::new(5, 3), Direction::Right, 6);

        for _ in 0..500 {
            let food = place_food(&snake, grid, 0, &mut rng).unwrap();
            assert!(!snake.occupies(food));
            assert!(grid.in_bounds(food));
        }
    }

    #[test]
    fn test_margin_keeps_food_off_the_border() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = Grid::new(8, 6);
        let snake = Snake::new(Position::new(0, 0), Direction::Up, 1);

        for _ in 0..500 {
            let food = place_food(&snake, grid, 1, &mut rng).unwrap();
            assert!((1..7).contains(&food.x), "x out of range: {:?}", food);
            assert!((1..5).contains(&food.y), "y out of range: {:?}", food);
        }
    }

    #[test]
    fn test_last_free_cell_is_found() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = Grid::new(2, 2);
        let snake = Snake::from_segments(
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)],
            Direction::Left,
        );

        assert_eq!(
            place_food(&snake, grid, 0, &mut rng),
            Some(Position::new(0, 1))
        );
    }

    #[test]
    fn test_full_board_yields_none() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = Grid::new(2, 2);
        let snake = Snake::from_segments(
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(1, 1),
                Position::new(0, 1),
            ],
            Direction::Up,
        );

        assert_eq!(place_food(&snake, grid, 0, &mut rng), None);
    }

    #[test]
    fn test_margin_swallowing_grid_yields_none() {
        let mut rng = StdRng::seed_from_u64(1);
        let snake = Snake::new(Position::new(0, 0), Direction::Up, 1);
        assert_eq!(place_food(&snake, Grid::new(2, 2), 1, &mut rng), None);
    }

    #[test]
    fn test_largest_grid_places_food() {
        let mut rng = StdRng::seed_from_u64(0);
        let grid = Grid::new(1_000, 1_000);
        let snake = Snake::new(Position::new(10, 10), Direction::Right, 3);

        let food = place_food(&snake, grid, 1, &mut rng).unwrap();
        assert!(grid.in_bounds(food));
        assert!(!snake.occupies(food));
    }

    #[test]
    fn test_same_seed_same_food() {
        let grid = Grid::new(40, 30);
        let snake = Snake::new(Position::new(10, 10), Direction::Right, 3);

        let a = place_food(&snake, grid, 1, &mut StdRng::seed_from_u64(99));
        let b = place_food(&snake, grid, 1, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
