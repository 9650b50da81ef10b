use crate::opcode::Opcode;

/// Renders an opcode as an assembly-style mnemonic, e.g. `LD V1, 0x22`.
/// Words that aren't instructions come out as `??? XXXX`.
pub fn disassemble(op: u16) -> String {
    let (x, y, nn, nnn) = (op.x(), op.y(), op.nn(), op.nnn());
    match op.nibbles() {
        (0x0, 0x0, 0xE, 0x0) => "CLS".to_string(),
        (0x0, 0x0, 0xE, 0xE) => "RET".to_string(),
        (0x0, 0x0, 0xF, 0xB) => "SCR".to_string(),
        (0x0, 0x0, 0xF, 0xC) => "SCL".to_string(),
        (0x0, 0x0, 0xF, 0xD) => "EXIT".to_string(),
        (0x0, 0x0, 0xF, 0xE) => "LOW".to_string(),
        (0x0, 0x0, 0xF, 0xF) => "HIGH".to_string(),
        (0x0, 0x0, 0xC, n) => format!("SCD {}", n),
        (0x1, ..) => format!("JP 0x{:03X}", nnn),
        (0x2, ..) => format!("CALL 0x{:03X}", nnn),
        (0x3, ..) => format!("SE V{:X}, 0x{:02X}", x, nn),
        (0x4, ..) => format!("SNE V{:X}, 0x{:02X}", x, nn),
        (0x5, .., 0x0) => format!("SE V{:X}, V{:X}", x, y),
        (0x6, ..) => format!("LD V{:X}, 0x{:02X}", x, nn),
        (0x7, ..) => format!("ADD V{:X}, 0x{:02X}", x, nn),
        (0x8, .., 0x0) => format!("LD V{:X}, V{:X}", x, y),
        (0x8, .., 0x1) => format!("OR V{:X}, V{:X}", x, y),
        (0x8, .., 0x2) => format!("AND V{:X}, V{:X}", x, y),
        (0x8, .., 0x3) => format!("XOR V{:X}, V{:X}", x, y),
        (0x8, .., 0x4) => format!("ADD V{:X}, V{:X}", x, y),
        (0x8, .., 0x5) => format!("SUB V{:X}, V{:X}", x, y),
        (0x8, .., 0x6) => format!("SHR V{:X}, V{:X}", x, y),
        (0x8, .., 0x7) => format!("SUBN V{:X}, V{:X}", x, y),
        (0x8, .., 0xE) => format!("SHL V{:X}, V{:X}", x, y),
        (0x9, .., 0x0) => format!("SNE V{:X}, V{:X}", x, y),
        (0xA, ..) => format!("LD I, 0x{:03X}", nnn),
        (0xB, ..) => format!("JP V0, 0x{:03X}", nnn),
        (0xC, ..) => format!("RND V{:X}, 0x{:02X}", x, nn),
        (0xD, .., n) => format!("DRW V{:X}, V{:X}, {}", x, y, n),
        (0xE, _, 0x9, 0xE) => format!("SKP V{:X}", x),
        (0xE, _, 0xA, 0x1) => format!("SKNP V{:X}", x),
        (0xF, _, 0x0, 0x7) => format!("LD V{:X}, DT", x),
        (0xF, _, 0x0, 0xA) => format!("LD V{:X}, K", x),
        (0xF, _, 0x1, 0x5) => format!("LD DT, V{:X}", x),
        (0xF, _, 0x1, 0x8) => format!("LD ST, V{:X}", x),
        (0xF, _, 0x1, 0xE) => format!("ADD I, V{:X}", x),
        (0xF, _, 0x2, 0x9) => format!("LD F, V{:X}", x),
        (0xF, _, 0x3, 0x0) => format!("LD HF, V{:X}", x),
        (0xF, _, 0x3, 0x3) => format!("LD B, V{:X}", x),
        (0xF, _, 0x5, 0x5) => format!("LD [I], V{:X}", x),
        (0xF, _, 0x6, 0x5) => format!("LD V{:X}, [I]", x),
        (0xF, _, 0x7, 0x5) => format!("LD R, V{:X}", x),
        (0xF, _, 0x8, 0x5) => format!("LD V{:X}, R", x),
        _ => format!("??? {:04X}", op),
    }
}
