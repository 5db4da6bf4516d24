//! Verse counts of the eighteen chapters.

/// Number of verses in each chapter, indexed by `chapter - 1`.
pub const CHAPTER_VERSE_COUNTS: [u32; 18] = [
    46, 72, 43, 42, 29, 47, 30, 28, 34, 42, 55, 20, 35, 27, 20, 24, 28, 78,
];

/// Verse count of a chapter, or `None` outside `1..=18`.
pub fn verse_count(chapter: u32) -> Option<u32> {
    let index = chapter.checked_sub(1)?;
    CHAPTER_VERSE_COUNTS.get(index as usize).copied()
}

/// Every `(chapter, verse)` pair in reading order.
pub fn verse_refs() -> impl Iterator<Item = (u32, u32)> {
    (1u32..).zip(CHAPTER_VERSE_COUNTS).flat_map(|(chapter, count)| {
        (1..=count).map(move |verse| (chapter, verse))
    })
}
