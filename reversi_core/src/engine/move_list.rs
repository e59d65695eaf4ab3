use crate::engine::Move;
use crate::logic::board::MAX_BOARD_SIZE;

// Every empty cell of the largest board is an upper bound.
const MAX_MOVES: usize = MAX_BOARD_SIZE * MAX_BOARD_SIZE;

pub struct MoveList {
    moves: [Move; MAX_MOVES],
    count: usize,
}

impl Default for MoveList {
    fn default() -> Self {
        Self {
            moves: [Move::default(); MAX_MOVES],
            count: 0,
        }
    }
}

impl MoveList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mv: Move) {
        if let Some(slot) = self.moves.get_mut(self.count) {
            *slot = mv;
            self.count += 1;
        } else {
            // In debug builds, we want to know if we are overflowing limits.
            debug_assert!(false, "MoveList overflow! Max moves: {MAX_MOVES}");
        }
    }

    pub const fn len(&self) -> usize {
        self.count
    }

    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn as_slice(&self) -> &[Move] {
        self.moves.get(0..self.count).unwrap_or(&[])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        let mut list = Self::new();
        for mv in iter {
            list.push(mv);
        }
        list
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::iter::Take<std::array::IntoIter<Move, MAX_MOVES>>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter().take(self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_iterate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());
        list.push(Move::new(0, 1));
        list.push(Move::new(2, 3));
        assert_eq!(list.len(), 2);
        assert!(list.contains(Move::new(2, 3)));
        assert!(!list.contains(Move::new(3, 2)));
        let collected: Vec<Move> = list.into_iter().collect();
        assert_eq!(collected, vec![Move::new(0, 1), Move::new(2, 3)]);
    }

    #[test]
    fn test_fill_to_capacity() {
        let list: MoveList = (0..MAX_BOARD_SIZE)
            .flat_map(|r| (0..MAX_BOARD_SIZE).filter_map(move |c| Move::from_coord(r, c)))
            .collect();
        assert_eq!(list.len(), MAX_MOVES);
        assert_eq!(list.as_slice().last(), Some(&Move::new(11, 11)));
    }
}
