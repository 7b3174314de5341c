// --- Score bounds ---
// Scores are white-positive 16-bit values. A magnitude above MATE_BASE
// encodes a forced mate; MATE_SCORE - ply means "mated at that ply".
pub const MIN_SCORE: i16 = -10_000;
pub const MAX_SCORE: i16 = 10_000;
pub const MATE_SCORE: i16 = 9_999;
pub const MATE_BASE: i16 = 9_000;

// --- Piece values (centipawns) ---
pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;

// --- Evaluation ---
pub const SIDE_TO_MOVE_BONUS: i32 = 5;
pub const BISHOP_PAIR_BONUS: i32 = 35;

// --- Search ---
pub const MAX_QSEARCH_DEPTH: i32 = 10;
pub const DEFAULT_MAX_DEPTH: i32 = 64;

// --- Time management ---
pub const DEFAULT_TIME_BUDGET_MS: u64 = 15_000;
pub const DEFAULT_MOVES_TO_GO: u64 = 40;
