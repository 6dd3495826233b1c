use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl SessionStatus {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game played on one board.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    board: Board,
    visibility: Array2<Visibility>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    status: SessionStatus,
    triggered_mine: Option<Coord2>,
}

impl Session {
    pub fn new(board: Board) -> Self {
        let size = board.size();
        Self {
            board,
            visibility: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            status: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_count()
    }

    /// Safe cells revealed so far, including those opened when the game ended.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines minus flags; negative when the player placed more flags than there are mines.
    pub fn mines_left(&self) -> i64 {
        i64::from(self.board.mine_count()) - i64::from(self.flagged_count)
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn visibility_at(&self, coords: Coord2) -> Result<Visibility> {
        let coords = self.board.validate_coords(coords)?;
        Ok(self.visibility[coords.to_nd_index()])
    }

    pub fn display_at(&self, coords: Coord2) -> Result<DisplayValue> {
        let coords = self.board.validate_coords(coords)?;
        Ok(self.display(coords))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkUpdate> {
        use Visibility::*;

        let coords = self.board.validate_coords(coords)?;
        if self.status.is_finished() {
            return Ok(Update::unchanged());
        }

        match self.visibility[coords.to_nd_index()] {
            Hidden => {
                self.visibility[coords.to_nd_index()] = Flagged;
                self.flagged_count += 1;
            }
            Flagged => {
                self.visibility[coords.to_nd_index()] = Hidden;
                self.flagged_count -= 1;
            }
            Revealed => return Ok(Update::unchanged()),
        }

        log::trace!("toggle flag {:?}: {:?}", coords, self.visibility[coords.to_nd_index()]);
        Ok(Update {
            outcome: MarkOutcome::Changed,
            changed: vec![self.change(coords)],
        })
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealUpdate> {
        let coords = self.board.validate_coords(coords)?;
        if self.status.is_finished() || self.visibility[coords.to_nd_index()] != Visibility::Hidden {
            return Ok(Update::unchanged());
        }

        let mut changed = Vec::new();

        if self.board.contains_mine(coords) {
            self.triggered_mine = Some(coords);
            self.end_game(SessionStatus::Lost, &mut changed);
            return Ok(Update {
                outcome: RevealOutcome::Lost,
                changed,
            });
        }

        self.flood_reveal(coords, &mut changed);
        log::trace!("reveal {:?}: {} cells opened", coords, changed.len());

        if self.revealed_count == self.board.safe_cells() {
            self.end_game(SessionStatus::Won, &mut changed);
            Ok(Update {
                outcome: RevealOutcome::Won,
                changed,
            })
        } else {
            Ok(Update {
                outcome: RevealOutcome::Continue,
                changed,
            })
        }
    }

    /// Opens `start` and, through every zero cell reached, the surrounding area.
    ///
    /// Flagged cells are never opened and stop the expansion. Uses an explicit queue since the area can span the
    /// whole board.
    fn flood_reveal(&mut self, start: Coord2, changed: &mut Vec<CellChange>) {
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            if self.visibility[coords.to_nd_index()] != Visibility::Hidden {
                continue;
            }
            let Some(adjacent_mines) = self.board[coords].adjacent_mines() else {
                continue;
            };

            self.visibility[coords.to_nd_index()] = Visibility::Revealed;
            self.revealed_count += 1;
            changed.push(self.change(coords));

            if adjacent_mines == 0 {
                to_visit.extend(
                    self.board
                        .iter_neighbors(coords)
                        .filter(|&pos| self.visibility[pos.to_nd_index()] == Visibility::Hidden),
                );
            }
        }
    }

    /// Moves to a final state and opens every hidden cell; flags stay but now show whether they were right.
    fn end_game(&mut self, status: SessionStatus, changed: &mut Vec<CellChange>) {
        self.status = status;

        for coords in iter_coords(self.size()) {
            match self.visibility[coords.to_nd_index()] {
                Visibility::Hidden => {
                    self.visibility[coords.to_nd_index()] = Visibility::Revealed;
                    if !self.board.contains_mine(coords) {
                        self.revealed_count += 1;
                    }
                }
                Visibility::Flagged => {}
                Visibility::Revealed => continue,
            }
            changed.push(self.change(coords));
        }

        log::debug!(
            "Game ended: {:?} with {} flags, triggered mine {:?}",
            status,
            self.flagged_count,
            self.triggered_mine
        );
    }

    fn display(&self, coords: Coord2) -> DisplayValue {
        let value = self.board[coords];
        match self.visibility[coords.to_nd_index()] {
            Visibility::Hidden => DisplayValue::Hidden,
            Visibility::Flagged if !self.status.is_finished() => DisplayValue::Flag,
            Visibility::Flagged if value.is_mine() => DisplayValue::CorrectFlag,
            Visibility::Flagged => DisplayValue::IncorrectFlag,
            Visibility::Revealed => match value {
                CellValue::Safe(count) => DisplayValue::Open(count),
                CellValue::Mine if self.triggered_mine == Some(coords) => DisplayValue::Exploded,
                CellValue::Mine => DisplayValue::Mine,
            },
        }
    }

    fn change(&self, coords: Coord2) -> CellChange {
        CellChange {
            coords,
            visibility: self.visibility[coords.to_nd_index()],
            display: self.display(coords),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(size: Coord2, mines: &[Coord2]) -> Session {
        Session::new(Board::from_mine_coords(size, mines).unwrap())
    }

    fn changed_coords(update: &RevealUpdate) -> Vec<Coord2> {
        let mut coords: Vec<_> = update.changed.iter().map(|change| change.coords).collect();
        coords.sort();
        coords
    }

    #[test]
    fn reveal_hits_mine_and_opens_the_board() {
        let mut session = session((2, 2), &[(0, 0)]);
        session.toggle_flag((1, 1)).unwrap();

        let update = session.reveal((0, 0)).unwrap();

        assert_eq!(update.outcome, RevealOutcome::Lost);
        assert_eq!(session.status(), SessionStatus::Lost);
        assert_eq!(session.triggered_mine(), Some((0, 0)));
        assert_eq!(session.visibility_at((0, 1)), Ok(Visibility::Revealed));
        assert_eq!(session.visibility_at((1, 0)), Ok(Visibility::Revealed));
        assert_eq!(session.visibility_at((1, 1)), Ok(Visibility::Flagged));
        assert_eq!(changed_coords(&update), vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert!(update.changed.contains(&CellChange {
            coords: (0, 0),
            visibility: Visibility::Revealed,
            display: DisplayValue::Exploded,
        }));
        assert_eq!(session.display_at((1, 1)), Ok(DisplayValue::IncorrectFlag));
        assert!(DisplayValue::IncorrectFlag.is_closed());
        assert!(!DisplayValue::Exploded.is_closed());
    }

    #[test]
    fn flagged_mines_are_reported_as_correct_after_a_loss() {
        let mut session = session((2, 2), &[(0, 0), (0, 1)]);
        session.toggle_flag((0, 1)).unwrap();

        session.reveal((0, 0)).unwrap();

        assert_eq!(session.display_at((0, 1)), Ok(DisplayValue::CorrectFlag));
        assert_eq!(session.display_at((1, 0)), Ok(DisplayValue::Open(2)));
    }

    #[test]
    fn reveal_flood_fill_opens_zero_region() {
        let mut session = session((3, 3), &[(2, 2)]);

        let update = session.reveal((0, 0)).unwrap();

        assert_eq!(update.outcome, RevealOutcome::Won);
        assert_eq!(session.display_at((0, 0)), Ok(DisplayValue::Open(0)));
        assert_eq!(session.display_at((1, 1)), Ok(DisplayValue::Open(1)));
        assert_eq!(session.display_at((2, 2)), Ok(DisplayValue::Mine));
        assert_eq!(update.changed.len(), 9);
    }

    #[test]
    fn flood_stops_at_numbered_cells() {
        // 0 0 1 * 1 0
        let mut session = session((1, 6), &[(0, 3)]);

        let update = session.reveal((0, 0)).unwrap();

        assert_eq!(update.outcome, RevealOutcome::Continue);
        assert_eq!(changed_coords(&update), vec![(0, 0), (0, 1), (0, 2)]);
        assert_eq!(session.visibility_at((0, 4)), Ok(Visibility::Hidden));
        assert_eq!(session.visibility_at((0, 5)), Ok(Visibility::Hidden));
    }

    #[test]
    fn numbered_cell_opens_alone() {
        let mut session = session((3, 3), &[(0, 0)]);

        let update = session.reveal((1, 1)).unwrap();

        assert_eq!(update.outcome, RevealOutcome::Continue);
        assert_eq!(
            update.changed,
            vec![CellChange {
                coords: (1, 1),
                visibility: Visibility::Revealed,
                display: DisplayValue::Open(1),
            }]
        );
        assert_eq!(session.revealed_count(), 1);
    }

    #[test]
    fn flood_never_opens_a_flagged_cell() {
        let mut session = session((5, 5), &[]);
        session.toggle_flag((2, 2)).unwrap();

        let update = session.reveal((0, 0)).unwrap();

        assert_eq!(update.outcome, RevealOutcome::Continue);
        assert_eq!(update.changed.len(), 24);
        assert_eq!(session.visibility_at((2, 2)), Ok(Visibility::Flagged));
        assert_eq!(session.status(), SessionStatus::InProgress);

        session.toggle_flag((2, 2)).unwrap();
        let update = session.reveal((2, 2)).unwrap();

        assert_eq!(update.outcome, RevealOutcome::Won);
        assert_eq!(session.status(), SessionStatus::Won);
    }

    #[test]
    fn neighbors_of_a_flag_show_their_count() {
        let mut session = session((3, 3), &[(0, 0)]);
        session.toggle_flag((0, 0)).unwrap();

        let update = session.reveal((2, 2)).unwrap();

        assert_eq!(update.outcome, RevealOutcome::Won);
        assert_eq!(session.display_at((1, 1)), Ok(DisplayValue::Open(1)));
        assert_eq!(session.display_at((0, 0)), Ok(DisplayValue::CorrectFlag));
        assert_eq!(session.visibility_at((0, 0)), Ok(Visibility::Flagged));
        assert_eq!(update.changed.len(), 9);
    }

    #[test]
    fn flagged_cell_cannot_be_revealed() {
        let mut session = session((2, 2), &[(0, 0)]);
        session.toggle_flag((0, 0)).unwrap();

        let update = session.reveal((0, 0)).unwrap();

        assert_eq!(update, RevealUpdate::unchanged());
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.visibility_at((0, 0)), Ok(Visibility::Flagged));
    }

    #[test]
    fn repeated_actions_are_no_ops() {
        let mut session = session((3, 3), &[(0, 0)]);
        assert_eq!(session.reveal((1, 1)).unwrap().outcome, RevealOutcome::Continue);

        assert_eq!(session.reveal((1, 1)).unwrap(), RevealUpdate::unchanged());
        assert_eq!(session.toggle_flag((1, 1)).unwrap(), MarkUpdate::unchanged());
        assert_eq!(session.revealed_count(), 1);
        assert_eq!(session.status(), SessionStatus::InProgress);
    }

    #[test]
    fn finished_session_ignores_actions() {
        let mut session = session((2, 2), &[(0, 0)]);
        session.reveal((0, 0)).unwrap();
        let before = session.clone();

        assert_eq!(session.reveal((1, 1)).unwrap(), RevealUpdate::unchanged());
        assert_eq!(session.toggle_flag((1, 1)).unwrap(), MarkUpdate::unchanged());
        assert_eq!(session, before);
        assert_eq!(session.status(), SessionStatus::Lost);
    }

    #[test]
    fn single_safe_cell_is_an_instant_win() {
        let mut session = Session::new(Board::random(1, 1, 0).unwrap());

        let update = session.reveal((0, 0)).unwrap();

        assert_eq!(update.outcome, RevealOutcome::Won);
        assert_eq!(update.changed.len(), 1);
        assert!(session.is_finished());
    }

    #[test]
    fn revealing_the_last_safe_cell_wins() {
        // * 1
        // 1 1
        let mut session = session((2, 2), &[(0, 0)]);

        assert_eq!(session.reveal((0, 1)).unwrap().outcome, RevealOutcome::Continue);
        assert_eq!(session.reveal((1, 0)).unwrap().outcome, RevealOutcome::Continue);
        let update = session.reveal((1, 1)).unwrap();

        assert_eq!(update.outcome, RevealOutcome::Won);
        assert_eq!(changed_coords(&update), vec![(0, 0), (1, 1)]);
        assert_eq!(session.display_at((0, 0)), Ok(DisplayValue::Mine));
        assert_eq!(session.triggered_mine(), None);
        assert_eq!(session.revealed_count(), 3);
    }

    #[test]
    fn revealed_count_ignores_mines_opened_by_a_loss() {
        let mut session = session((2, 3), &[(0, 0), (0, 1)]);
        session.reveal((1, 2)).unwrap();
        session.toggle_flag((0, 2)).unwrap();

        session.reveal((0, 0)).unwrap();

        assert_eq!(session.visibility_at((0, 1)), Ok(Visibility::Revealed));
        assert_eq!(session.revealed_count(), 3);
        assert_eq!(session.board().safe_cells(), 4);
    }

    #[test]
    fn toggle_flag_round_trips_and_tracks_mines_left() {
        let mut session = session((2, 2), &[(1, 1)]);

        let update = session.toggle_flag((0, 0)).unwrap();
        assert_eq!(update.outcome, MarkOutcome::Changed);
        assert_eq!(
            update.changed,
            vec![CellChange {
                coords: (0, 0),
                visibility: Visibility::Flagged,
                display: DisplayValue::Flag,
            }]
        );
        session.toggle_flag((0, 1)).unwrap();
        assert_eq!(session.flag_count(), 2);
        assert_eq!(session.total_mines(), 1);
        assert_eq!(session.mines_left(), -1);

        let update = session.toggle_flag((0, 0)).unwrap();
        assert_eq!(update.changed[0].visibility, Visibility::Hidden);
        assert_eq!(update.changed[0].display, DisplayValue::Hidden);
        assert_eq!(session.mines_left(), 0);
    }

    #[test]
    fn out_of_bounds_actions_fail() {
        let mut session = session((2, 3), &[]);

        assert_eq!(session.reveal((2, 0)), Err(GameError::OutOfBounds));
        assert_eq!(session.toggle_flag((0, 3)), Err(GameError::OutOfBounds));
        assert_eq!(session.visibility_at((5, 5)), Err(GameError::OutOfBounds));
        assert_eq!(session.display_at((2, 3)), Err(GameError::OutOfBounds));
        assert_eq!(session.status(), SessionStatus::InProgress);
    }
}
