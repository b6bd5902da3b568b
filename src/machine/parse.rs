//! Parses puzzle text into machines.
//!
//! One machine per line: a bracketed `#`/`.` light pattern, one or more
//! parenthesised button index groups and a braced joltage list, e.g.
//! `[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}`.
use super::error::ParseError;
use super::model::Machine;
use nom::bytes::complete::is_a;
use nom::character::complete::{char, digit1, space0, space1};
use nom::combinator::{all_consuming, map, map_res};
use nom::multi::{separated_list0, separated_list1};
use nom::sequence::{delimited, terminated};
use nom::{IResult, Parser};
use std::str::FromStr;

type RawLine = (Vec<bool>, Vec<Vec<usize>>, Vec<u64>);

fn number<N: FromStr>(input: &str) -> IResult<&str, N> {
    map_res(digit1, |s: &str| s.parse::<N>()).parse(input)
}

fn lights(input: &str) -> IResult<&str, Vec<bool>> {
    map(delimited(char('['), is_a("#."), char(']')), |s: &str| {
        s.chars().map(|c| c == '#').collect()
    })
    .parse(input)
}

fn button(input: &str) -> IResult<&str, Vec<usize>> {
    delimited(char('('), separated_list0(char(','), number), char(')')).parse(input)
}

fn joltage(input: &str) -> IResult<&str, Vec<u64>> {
    delimited(char('{'), separated_list1(char(','), number), char('}')).parse(input)
}

fn machine_line(input: &str) -> IResult<&str, RawLine> {
    all_consuming(delimited(
        space0,
        (
            terminated(lights, space1),
            terminated(separated_list1(space1, button), space1),
            joltage,
        ),
        space0,
    ))
    .parse(input)
}

fn parse_line(line: &str, line_no: usize) -> Result<Machine, ParseError> {
    let (_, (target_lights, buttons, joltage)) = machine_line(line).map_err(|e| ParseError {
        line: line_no,
        message: format!("malformed machine: {e}"),
    })?;
    Machine::new(target_lights, buttons, joltage).map_err(|e| ParseError {
        line: line_no,
        message: e.to_string(),
    })
}

/// Parses every non-blank line of `text` into a machine, in order.
pub fn parse_machines(text: &str) -> Result<Vec<Machine>, ParseError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_line(line.trim_end_matches('\r'), i + 1))
        .collect()
}

impl FromStr for Machine {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_line(s.trim(), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::MachineError;
    use rstest::rstest;

    const EXAMPLE: &str = "\
[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
[...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}
[.###.#] (0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}
";

    #[test]
    fn test_parses_example() {
        let machines = parse_machines(EXAMPLE).unwrap();
        assert_eq!(machines.len(), 3);

        let first = &machines[0];
        assert_eq!(first.lights(), &[false, true, true, false]);
        assert_eq!(first.button_count(), 6);
        assert_eq!(first.buttons()[1].indices(), &[1, 3]);
        assert_eq!(first.joltage(), &[3, 5, 4, 7]);

        assert_eq!(machines[2].light_count(), 6);
    }

    #[test]
    fn test_skips_blank_lines_and_keeps_line_numbers() {
        let text = "\n[#] (0) {1}\n\n[#] (1) {1}\n";
        let err = parse_machines(text).unwrap_err();
        assert_eq!(err.line, 4);
        assert_eq!(
            err.message,
            MachineError::IndexOutOfRange { button: 0, index: 1, lights: 1 }.to_string()
        );
    }

    #[test]
    fn test_empty_button_group() {
        let m: Machine = "[.] () {0}".parse().unwrap();
        assert!(m.buttons()[0].is_noop());
    }

    #[rstest]
    #[case("[.#] (0) (1)")] // missing joltage
    #[case("[.#] {1,1}")] // missing buttons
    #[case("(0) [.#] {1,1}")] // wrong order
    #[case("[.x] (0) {1,1}")] // bad light character
    #[case("[.#] (0) {1,1} trailing")]
    fn test_rejects_malformed_lines(#[case] line: &str) {
        let err = line.parse::<Machine>().unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.starts_with("malformed machine"), "{}", err.message);
    }

    #[test]
    fn test_dimension_mismatch_is_reported() {
        let err = "[.#] (0) {1}".parse::<Machine>().unwrap_err();
        assert!(err.message.contains("2 lights but 1 joltage"), "{}", err.message);
    }
}
