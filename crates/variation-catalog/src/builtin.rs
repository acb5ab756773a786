//! Built-in Italian Opening catalog.
//!
//! Six annotated lines, from the basic setup to the Traxler Counterattack,
//! plus four tactic positions from the same openings. The first variation is
//! the selector's default.

use crate::catalog::Catalog;
use crate::square::Square;
use crate::variation::{
    Highlight, HighlightColor, MoveAnnotation, TacticPosition, VariationDefinition,
};

/// Id of the variation shown before the user picks one.
pub const DEFAULT_VARIATION: &str = "basic-setup";

/// Creates the built-in catalog.
#[must_use]
pub fn builtin_catalog() -> Catalog {
    Catalog::from_trusted(builtin_variations(), builtin_tactics())
}

// Helper to build a highlight from square names
fn marks(squares: &[&str], color: HighlightColor) -> Highlight {
    Highlight::new(
        squares
            .iter()
            .filter_map(|s| Square::from_algebraic(s))
            .collect(),
        color,
    )
}

/// Returns the built-in variations in selector order.
#[must_use]
pub fn builtin_variations() -> Vec<VariationDefinition> {
    use HighlightColor::{Green, Red, Yellow};

    vec![
        VariationDefinition::new(
            "basic-setup",
            "Italian Opening: Basic Setup",
            "1.e4 e5 2.Nf3 Nc6 3.Bc4",
        )
        .with_annotations(vec![
            MoveAnnotation::new(
                1,
                "e4",
                "White starts with 1.e4, the King's Pawn Opening, immediately fighting for central control and opening lines for the queen and king's bishop. This is the most popular first move in chess.",
            ),
            MoveAnnotation::new(
                1,
                "e5",
                "Black responds symmetrically with 1...e5, also staking a claim in the center and preparing to develop pieces. This leads to open and tactical games.",
            ),
            MoveAnnotation::new(
                2,
                "Nf3",
                "White develops the kingside knight, attacking Black's e5 pawn and preparing to castle. This is the most common and flexible developing move.",
            ),
            MoveAnnotation::new(
                2,
                "Nc6",
                "Black develops the queenside knight, defending the e5 pawn and controlling the d4 square. This is a natural and solid response.",
            ),
            MoveAnnotation::new(
                3,
                "Bc4",
                "This is the Italian Opening. The bishop on c4 puts pressure on Black's weakest point, the f7 pawn, which is only defended by the king. It also controls key central squares and prepares for kingside castling.",
            )
            .with_highlight(marks(&["f7"], Red)),
        ]),
        VariationDefinition::new(
            "giuoco-piano",
            "Giuoco Piano: Main Line",
            "1.e4 e5 2.Nf3 Nc6 3.Bc4 Bc5 4.c3 Nf6 5.d4 exd4 6.cxd4 Bb6",
        )
        .with_annotations(vec![
            MoveAnnotation::new(
                3,
                "Bc5",
                "Black develops their own bishop to c5, creating a symmetrical position. This is the start of the Giuoco Piano, or 'Quiet Game'.",
            )
            .with_highlight(marks(&["f2"], Yellow)),
            MoveAnnotation::new(
                4,
                "c3",
                "White prepares the central pawn push d4. This is a key strategic idea in the Italian, aiming to seize control of the center.",
            )
            .with_highlight(marks(&["d4"], Green)),
            MoveAnnotation::new(
                4,
                "Nf6",
                "Black develops the other knight and puts counter-pressure on White's e4 pawn.",
            ),
            MoveAnnotation::new(
                5,
                "d4",
                "White executes the d4 pawn break, challenging Black in the center and opening lines.",
            ),
            MoveAnnotation::new(
                5,
                "exd4",
                "Black is forced to capture, otherwise White gets a massive pawn center.",
            ),
            MoveAnnotation::new(
                6,
                "cxd4",
                "White recaptures, maintaining a strong central presence.",
            ),
            MoveAnnotation::new(
                6,
                "Bb6",
                "A solid retreat. Black keeps the bishop active and prepares to challenge White's center.",
            ),
        ]),
        VariationDefinition::new(
            "giuoco-pianissimo",
            "Giuoco Pianissimo: Positional Play",
            "1.e4 e5 2.Nf3 Nc6 3.Bc4 Bc5 4.d3 Nf6 5.O-O d6 6.c3 a6",
        )
        .with_annotations(vec![
            MoveAnnotation::new(
                4,
                "d3",
                "Instead of the aggressive c3 and d4, White plays the quiet d3. This leads to the Giuoco Pianissimo or 'Very Quiet Game'. The focus is on slow, strategic maneuvering.",
            ),
            MoveAnnotation::new(4, "Nf6", "Black develops naturally."),
            MoveAnnotation::new(5, "O-O", "White castles, securing the king."),
            MoveAnnotation::new(
                5,
                "d6",
                "Black solidifies the center and prepares to develop the light-squared bishop.",
            ),
            MoveAnnotation::new(
                6,
                "c3",
                "White prepares d4 for the future and creates a retreat square for the bishop on c2.",
            ),
            MoveAnnotation::new(
                6,
                "a6",
                "A key move. Black prevents White's b4 push and prepares to develop the bishop via a7.",
            ),
        ]),
        VariationDefinition::new(
            "evans-gambit",
            "Evans Gambit: Sharp Play",
            "1.e4 e5 2.Nf3 Nc6 3.Bc4 Bc5 4.b4 Bxb4 5.c3 Ba5 6.d4",
        )
        .with_annotations(vec![
            MoveAnnotation::new(
                4,
                "b4",
                "The Evans Gambit! White offers a pawn to deflect Black's c5 bishop, aiming to build a powerful center with c3 and d4 and accelerate development.",
            )
            .with_highlight(marks(&["b4"], Green)),
            MoveAnnotation::new(
                4,
                "Bxb4",
                "Evans Gambit Accepted. Black takes the pawn, but this allows White to gain time.",
            ),
            MoveAnnotation::new(5, "c3", "White attacks the bishop and prepares d4."),
            MoveAnnotation::new(
                5,
                "Ba5",
                "The most common retreat, keeping the bishop active and pinning the c3 pawn.",
            ),
            MoveAnnotation::new(
                6,
                "d4",
                "White seizes the center. This is the compensation for the gambit pawn: a strong center and rapid development.",
            ),
        ]),
        VariationDefinition::new(
            "fried-liver",
            "Fried Liver Attack",
            "1.e4 e5 2.Nf3 Nc6 3.Bc4 Nf6 4.Ng5 d5 5.exd5 Nxd5 6.Nxf7 Kxf7 7.Qf3+",
        )
        .with_annotations(vec![
            MoveAnnotation::new(
                3,
                "Nf6",
                "The Two Knights Defense. Black develops and counter-attacks e4.",
            ),
            MoveAnnotation::new(
                4,
                "Ng5",
                "A very aggressive move. White breaks the opening principle 'don't move the same piece twice' to attack the f7 pawn with both the knight and bishop.",
            )
            .with_highlight(marks(&["f7"], Red)),
            MoveAnnotation::new(
                4,
                "d5",
                "The correct response. Black blocks the bishop's attack on f7 and attacks White's bishop.",
            ),
            MoveAnnotation::new(5, "exd5", "White captures the pawn."),
            MoveAnnotation::new(
                5,
                "Nxd5",
                "A common mistake by beginners, though it can lead to complex play. The main line is 5...Na5. This move allows the Fried Liver Attack.",
            ),
            MoveAnnotation::new(
                6,
                "Nxf7",
                "The Fried Liver Attack! White sacrifices the knight on f7 to expose the black king. This is a powerful attack.",
            )
            .with_highlight(marks(&["f7", "e6"], Red)),
            MoveAnnotation::new(
                6,
                "Kxf7",
                "Black must recapture. The king is now dangerously exposed in the center of the board.",
            ),
            MoveAnnotation::new(
                7,
                "Qf3+",
                "White continues the attack with a check, forcing the king to move and preventing Black from organizing a defense.",
            ),
        ]),
        VariationDefinition::new(
            "traxler-counterattack",
            "Traxler Counterattack",
            "1.e4 e5 2.Nf3 Nc6 3.Bc4 Nf6 4.Ng5 Bc5 5.Nxf7 Bxf2+",
        )
        .with_annotations(vec![
            MoveAnnotation::new(4, "Ng5", "White attacks f7."),
            MoveAnnotation::new(
                4,
                "Bc5",
                "The Traxler Counterattack! Instead of defending f7, Black launches a shocking counterattack against White's f2 square. This leads to incredibly sharp and dangerous positions for both sides.",
            )
            .with_highlight(marks(&["f2"], Red)),
            MoveAnnotation::new(
                5,
                "Nxf7",
                "One of White's main options is to capture on f7. Now both kings are in danger.",
            ),
            MoveAnnotation::new(
                5,
                "Bxf2+",
                "Black springs the trap, sacrificing the bishop to expose the white king. A tactical melee ensues.",
            ),
        ]),
    ]
}

/// Returns the built-in tactic positions.
#[must_use]
pub fn builtin_tactics() -> Vec<TacticPosition> {
    vec![
        TacticPosition::new(
            "tactic-board-1",
            "r1b1k2r/pppp1Npp/2n5/2b5/2B1P3/8/PPPP1PPP/RNBQ1RK1 b kq - 0 6",
        ),
        TacticPosition::new(
            "tactic-board-2",
            "r1b1k2r/ppp2Npp/2n5/3np3/2B5/8/PPPP1PPP/RNBQK2R b KQkq - 0 7",
        ),
        TacticPosition::new(
            "tactic-board-3",
            "r1bqk2r/ppppbppp/2n2n2/4p3/2B1P3/3P1N2/PPP2PPP/RNBQ1RK1 b kq - 2 5",
        ),
        TacticPosition::new(
            "tactic-board-4",
            "r1bqk2r/ppp2kpp/2n5/2bnp3/2B5/5Q2/PPPP1PPP/RNB1K2R b KQ - 1 7",
        ),
    ]
}
