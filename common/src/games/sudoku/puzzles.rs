use super::grid::Grid;

/// Built-in puzzles, one row per line.
pub const PUZZLES: [&str; 5] = [
    "530070000/600195000/098000060/800060003/400803001/700020006/060000280/000419005/000080079",
    "300000012/000302000/000000000/000000000/000000000/000000000/000000000/000203000/210000034",
    "400000009/050000060/006000700/000700000/000080000/000009000/001000200/020000030/300000001",
    "103006080/050080000/009500000/000050000/000000000/000070000/000008500/000010020/030200601",
    "000700000/100000000/000430200/000000000/000000000/000000000/008021000/000000003/000005000",
];

pub fn puzzle_count() -> usize {
    PUZZLES.len()
}

pub fn puzzle(index: usize) -> Option<Result<Grid, String>> {
    PUZZLES.get(index).map(|text| text.parse())
}
