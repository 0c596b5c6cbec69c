use super::{classifier::hex_value, AssemblerError, ErrorKind};
use crate::ast::{Directive, SourceLine};

/// A contiguous region of code placed at an absolute origin.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Block {
    /// Address of the first byte in the block
    pub offset: u16,
    /// Lines of the block in file order, excluding the `.org` directive
    pub lines: Vec<SourceLine>,
}

impl Block {
    pub fn new(offset: u16) -> Self {
        Self {
            offset,
            lines: Vec::new(),
        }
    }
}

/// Parse an origin directive, `.org $8000`.
///
/// Returns `None` if the line is not a directive at all.
fn parse_origin(code: &str) -> Option<Result<Directive, ErrorKind>> {
    let operand = code.strip_prefix(Directive::ORIGIN)?.trim();
    let address = operand
        .strip_prefix('$')
        .and_then(|hex| hex_value(hex, 1..=4))
        .map(|address| Directive::Origin(address as u16))
        .ok_or_else(|| ErrorKind::Syntax(code.to_owned()));
    Some(address)
}

/// Split a program into blocks delimited by `.org` directives.
///
/// Every line of code must be preceded by an origin directive. The blocks are returned in
/// ascending order of their origin, blocks with the same origin keep their order in the file.
#[tracing::instrument(skip(lines))]
pub fn extract_blocks(lines: &[SourceLine]) -> Result<Vec<Block>, AssemblerError> {
    let mut blocks: Vec<Block> = Vec::new();

    for line in lines {
        match parse_origin(&line.code) {
            Some(Ok(Directive::Origin(offset))) => blocks.push(Block::new(offset)),
            Some(Err(kind)) => return Err(AssemblerError::new(line.number, kind)),
            None => blocks
                .last_mut()
                .ok_or_else(|| AssemblerError::new(line.number, ErrorKind::MissingOrigin))?
                .lines
                .push(line.clone()),
        }
    }

    blocks.sort_by_key(|block| block.offset);

    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn lines(code: &[&str]) -> Vec<SourceLine> {
        code.iter()
            .enumerate()
            .map(|(ix, code)| SourceLine::new(ix + 1, code))
            .collect()
    }

    #[test]
    fn test_extract_blocks() -> Result<(), AssemblerError> {
        let source = lines(&[
            ".org $9000",
            "nmi: rti",
            ".org $8000",
            "reset: ldx #$ff",
            "txs",
            ".org $fffa",
            ".org $1",
        ]);

        let expected = vec![
            Block::new(0x0001),
            Block {
                offset: 0x8000,
                lines: vec![
                    SourceLine::new(4, "reset: ldx #$ff"),
                    SourceLine::new(5, "txs"),
                ],
            },
            Block {
                offset: 0x9000,
                lines: vec![SourceLine::new(2, "nmi: rti")],
            },
            Block::new(0xfffa),
        ];
        assert_eq!(extract_blocks(&source)?, expected);

        Ok(())
    }

    #[test]
    fn test_same_origin_keeps_file_order() -> Result<(), AssemblerError> {
        let source = lines(&[".org $0200", "inx", ".org $0200", "iny"]);
        let blocks = extract_blocks(&source)?;
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].lines, vec![SourceLine::new(2, "inx")]);
        assert_eq!(blocks[1].lines, vec![SourceLine::new(4, "iny")]);

        Ok(())
    }

    #[test]
    fn test_missing_origin() {
        let source = lines(&["lda #$01", ".org $8000"]);
        assert_eq!(
            extract_blocks(&source),
            Err(AssemblerError::new(1, ErrorKind::MissingOrigin))
        );
    }

    #[test]
    fn test_invalid_origin() {
        let tests = vec![".org 8000", ".org $12345", ".org", ".org $xyz"];
        for code in tests {
            let source = lines(&[code]);
            assert_eq!(
                extract_blocks(&source),
                Err(AssemblerError::new(1, ErrorKind::Syntax(code.to_string()))),
                "{}",
                code
            );
        }
    }

    #[test]
    fn test_empty_program() -> Result<(), AssemblerError> {
        assert_eq!(extract_blocks(&[])?, vec![]);
        Ok(())
    }
}
