use crate::image::MemoryImage;

/// Xilinx coefficients file, one hex byte per line.
///
/// ```text
/// memory_initialization_radix=16;
/// memory_initialization_vector=
/// ea,
/// ...
/// ea;
/// ```
#[tracing::instrument(skip_all)]
pub fn to_coe(image: &MemoryImage) -> String {
    let bytes = image.as_bytes();
    let mut str = String::with_capacity(bytes.len() * 4 + 64);

    str.push_str("memory_initialization_radix=16;\n");
    str.push_str("memory_initialization_vector=\n");
    for (ix, byte) in bytes.iter().enumerate() {
        let separator = if ix + 1 == bytes.len() { ';' } else { ',' };
        str.push_str(format!("{:02x}{}\n", byte, separator).as_str());
    }

    str
}

/// Memory initialization file, one byte per line in binary.
#[tracing::instrument(skip_all)]
pub fn to_mif(image: &MemoryImage) -> String {
    let bytes = image.as_bytes();
    let mut str = String::with_capacity(bytes.len() * 9);

    for byte in bytes {
        str.push_str(format!("{:08b}\n", byte).as_str());
    }

    str
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_to_coe() {
        let mut image = MemoryImage::new();
        image.write_byte(0x0000, 0xa9);
        image.write_byte(0x0001, 0x01);
        image.write_byte(0xffff, 0x80);

        let coe = to_coe(&image);
        let lines = coe.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), MemoryImage::MEMORY_SIZE + 2);
        assert_eq!(
            lines[..5].to_vec(),
            vec![
                "memory_initialization_radix=16;",
                "memory_initialization_vector=",
                "a9,",
                "01,",
                "ea,",
            ]
        );
        assert_eq!(lines.last(), Some(&"80;"));
    }

    #[test]
    fn test_to_mif() {
        let mut image = MemoryImage::new();
        image.write_byte(0x0001, 0x05);

        let mif = to_mif(&image);
        let lines = mif.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), MemoryImage::MEMORY_SIZE);
        assert_eq!(lines[..3].to_vec(), vec!["11101010", "00000101", "11101010"]);
    }
}
