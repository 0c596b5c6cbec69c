use crate::{
    assembler::{
        codegen::EncodedInstruction,
        compiler::{AssembledBlock, InstructionRecord},
        Assembly,
    },
    ast::Directive,
};

/// Generate a listing line from an instruction and its machine code.
///
/// E.g. `$8000  20 06 80  jsr $8006`
pub fn generate_line(record: &InstructionRecord, code: &EncodedInstruction) -> String {
    let bytes_str = code
        .bytes()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<String>>()
        .join(" ");

    format!("${:04x}  {:<8}  {}\n", code.address, bytes_str, record.instruction)
}

fn generate_block(str: &mut String, block: &AssembledBlock) {
    str.push_str(format!("\n{}\n", Directive::Origin(block.offset)).as_str());
    for (record, code) in block.records.iter().zip(&block.code) {
        str.push_str(generate_line(record, code).as_str());
    }
}

/// Listing of an assembled program followed by its symbol table.
#[tracing::instrument(skip_all)]
pub fn generate(assembly: &Assembly) -> String {
    let mut str = String::new();
    str.push_str(" Addr  Hexdump   Instructions\n");
    str.push_str("-----------------------------\n");
    //                 $8000  20 06 80  jsr $8006

    for block in &assembly.blocks {
        generate_block(&mut str, block);
    }

    if !assembly.symbols.is_empty() {
        str.push_str("\nSymbols\n");
        str.push_str("-------\n");
        for symbol in assembly.symbols.sorted() {
            str.push_str(format!("{}\n", symbol).as_str());
        }
    }

    str
}
