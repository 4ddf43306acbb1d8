//! Fixture builders shared by the integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Big-endian TIFF block carrying a single DateTimeOriginal
pub fn tiff_with_date(date: &str) -> Vec<u8> {
    let mut value = date.as_bytes().to_vec();
    value.push(0);

    let mut t = Vec::new();
    t.extend_from_slice(b"MM\x00\x2a");
    t.extend_from_slice(&8u32.to_be_bytes());
    // IFD0: ExifIFDPointer -> 26
    t.extend_from_slice(&1u16.to_be_bytes());
    t.extend_from_slice(&0x8769u16.to_be_bytes());
    t.extend_from_slice(&4u16.to_be_bytes());
    t.extend_from_slice(&1u32.to_be_bytes());
    t.extend_from_slice(&26u32.to_be_bytes());
    t.extend_from_slice(&0u32.to_be_bytes());
    // Exif IFD: DateTimeOriginal at 44
    t.extend_from_slice(&1u16.to_be_bytes());
    t.extend_from_slice(&0x9003u16.to_be_bytes());
    t.extend_from_slice(&2u16.to_be_bytes());
    t.extend_from_slice(&(value.len() as u32).to_be_bytes());
    t.extend_from_slice(&44u32.to_be_bytes());
    t.extend_from_slice(&0u32.to_be_bytes());
    t.extend_from_slice(&value);
    t
}

pub fn jpeg_with_date(date: &str) -> Vec<u8> {
    let tiff = tiff_with_date(date);
    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&((tiff.len() + 8) as u16).to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &b in bytes {
        crc ^= u32::from(b);
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

fn png_chunk(kind: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut chunk = (data.len() as u32).to_be_bytes().to_vec();
    let mut body = kind.to_vec();
    body.extend_from_slice(data);
    chunk.extend_from_slice(&body);
    chunk.extend_from_slice(&crc32(&body).to_be_bytes());
    chunk
}

/// 1x1 PNG with an `eXIf` chunk
pub fn png_with_date(date: &str) -> Vec<u8> {
    let mut ihdr = Vec::new();
    ihdr.extend_from_slice(&1u32.to_be_bytes());
    ihdr.extend_from_slice(&1u32.to_be_bytes());
    ihdr.extend_from_slice(&[8, 2, 0, 0, 0]);

    let mut png = b"\x89PNG\r\n\x1a\n".to_vec();
    png.extend(png_chunk(b"IHDR", &ihdr));
    png.extend(png_chunk(b"eXIf", &tiff_with_date(date)));
    png.extend(png_chunk(b"IEND", &[]));
    png
}

fn boxed(kind: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut b = ((payload.len() + 8) as u32).to_be_bytes().to_vec();
    b.extend_from_slice(kind);
    b.extend_from_slice(payload);
    b
}

/// Minimal MP4 whose `mvhd` creation time is `seconds` after 1904-01-01
pub fn mp4_with_creation(seconds: u32) -> Vec<u8> {
    let mut mvhd = vec![0u8, 0, 0, 0];
    mvhd.extend_from_slice(&seconds.to_be_bytes());
    mvhd.extend_from_slice(&seconds.to_be_bytes());
    mvhd.extend_from_slice(&1000u32.to_be_bytes());
    mvhd.extend_from_slice(&0u32.to_be_bytes());
    mvhd.extend_from_slice(&[0u8; 80]);

    let mut file = boxed(b"ftyp", b"isom\0\0\x02\0isomiso2mp41");
    file.extend(boxed(b"moov", &boxed(b"mvhd", &mvhd)));
    file
}

/// Write `contents` to `dir/name` and return the path
pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Sorted file names directly inside `dir`
pub fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
