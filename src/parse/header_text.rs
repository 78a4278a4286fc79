use nom::{
    IResult, Parser,
    bytes::complete::take_till,
    character::complete::char,
    combinator::{map, rest},
    sequence::separated_pair,
};

pub struct FieldLineRef<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

impl<'a> From<(&'a str, &'a str)> for FieldLineRef<'a> {
    fn from(value: (&'a str, &'a str)) -> Self {
        Self {
            name: value.0,
            value: value.1,
        }
    }
}

/// Split a single line on its first colon.
pub fn field_line(input: &str) -> IResult<&str, FieldLineRef<'_>> {
    let pair = separated_pair(take_till(|c: char| c == ':'), char(':'), rest);

    map(pair, FieldLineRef::from).parse(input)
}
