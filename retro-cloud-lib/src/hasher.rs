use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const CHUNK_SIZE: usize = 64 * 1024; // 64 KB

/// CRC32 of a whole file as 8 uppercase hex digits.
pub fn crc32_file(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    crc32_reader(file)
}

/// CRC32 of everything `reader` yields, read in 64 KB chunks.
pub fn crc32_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = crc32fast::Hasher::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("{:08X}", hasher.finalize()))
}
