/* src/cli/core/src/ui.rs */

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub fn ok(msg: &str) {
  println!("  {GREEN}\u{2713}{RESET} {msg}");
}

pub fn fail(msg: &str) {
  println!("  {RED}\u{2717}{RESET} {msg}");
}

pub fn arrow(msg: &str) {
  println!("  {GREEN}\u{2192}{RESET} {msg}");
}

pub fn detail(msg: &str) {
  println!("        {msg}");
}

pub fn summary(passed: usize, failed: usize) {
  println!();
  if failed == 0 {
    println!("  {BOLD}{passed} passed{RESET}");
  } else {
    println!("  {BOLD}{passed} passed{RESET}, {RED}{failed} failed{RESET}");
  }
}

/// 1-based line and column (in chars) of a byte offset.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
  let mut offset = offset.min(source.len());
  while !source.is_char_boundary(offset) {
    offset -= 1;
  }
  let before = &source[..offset];
  let line = before.matches('\n').count() + 1;
  let line_start = before.rfind('\n').map_or(0, |i| i + 1);
  (line, before[line_start..].chars().count() + 1)
}
