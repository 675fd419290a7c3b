// Copyright 2026 the softblit authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Export to the uncompressed true-color TGA container.

use std::io::{self, Write};

use crate::context::BitmapContext;
use crate::BYTES_PER_PIXEL;

impl BitmapContext<'_> {
    /// Writes the surface as an uncompressed 32-bit TGA image.
    ///
    /// The 18-byte header is followed by the pixel data bottom-to-top, each
    /// pixel as B, G, R, A with straight (de-premultiplied) color.
    pub fn write_tga<W: Write>(&self, destination: &mut W) -> io::Result<()> {
        let width = self.width();
        let height = self.height();
        let mut data = vec![0u8; self.len() as usize * BYTES_PER_PIXEL];

        // Copy the bitmap data as BGRA, bottom-up.
        let mut offset_source = 0;
        let width4 = width << 2;
        let width8 = width << 3;
        let mut offset_dest = ((height - 1) * width4) as usize;
        for _y in 0..height {
            for _x in 0..width {
                let c = self.pixels().get(offset_source);
                let a = (c >> 24) as u8;

                // Account for pre-multiplied alpha; a zero alpha divides
                // as one.
                let mut ai = a as u32;
                if ai == 0 {
                    ai = 1;
                }

                // Scale the reciprocal so the divide becomes a multiply
                // and a shift.
                let ai = (255 << 8) / ai;
                data[offset_dest + 3] = a; // A
                data[offset_dest + 2] = ((((c >> 16) & 0xFF) * ai) >> 8) as u8; // R
                data[offset_dest + 1] = ((((c >> 8) & 0xFF) * ai) >> 8) as u8; // G
                data[offset_dest] = (((c & 0xFF) * ai) >> 8) as u8; // B

                offset_source += 1;
                offset_dest += BYTES_PER_PIXEL;
            }
            offset_dest = offset_dest.wrapping_sub(width8 as usize);
        }

        let header: [u8; 18] = [
            0, // ID length
            0, // no color map
            2, // uncompressed, true color
            0, 0, 0, 0, 0, 0, 0, 0, 0, // color map spec + x and y origin
            (width & 0x00FF) as u8,
            ((width & 0xFF00) >> 8) as u8,
            (height & 0x00FF) as u8,
            ((height & 0xFF00) >> 8) as u8,
            32, // 32 bits per pixel
            0,
        ];

        destination.write_all(&header)?;
        destination.write_all(&data)
    }
}
