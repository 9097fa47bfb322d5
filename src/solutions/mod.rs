mod day01;
mod day02;
mod day03;
mod day04;
mod day05;
mod day06;
mod day07;
mod day08;
mod day09;
mod day10;
mod day11;
mod day12;
mod day13;
mod day14;
mod day15;
mod day16;
mod day17;
mod day18;
mod day19;
mod day20;

pub use day01::day1;
pub use day02::day2;
pub use day03::day3;
pub use day04::day4;
pub use day05::day5;
pub use day06::day6;
pub use day07::day7;
pub use day08::day8;
pub use day09::day9;
pub use day10::day10;
pub use day11::day11;
pub use day12::day12;
pub use day13::day13;
pub use day14::day14;
pub use day15::day15;
pub use day16::day16;
pub use day17::day17;
pub use day18::day18;
pub use day19::day19;
pub use day20::day20;
