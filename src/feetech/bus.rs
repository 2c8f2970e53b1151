//! Packet codec for the Feetech STS serial bus.
//!
//! Both directions are framed `0xFF 0xFF, id, len, body..., chk` where `len`
//! counts everything after itself and `chk` is the inverted byte sum from
//! `id` through the last body byte. Multi-byte registers are little-endian.

use std::io;
use std::io::{Read, Write};

pub const HEADER: [u8; 2] = [0xFF, 0xFF];

pub const INSTR_PING: u8 = 0x01;
pub const INSTR_READ: u8 = 0x02;
pub const INSTR_WRITE: u8 = 0x03;

pub const REG_TORQUE_ENABLE: u8 = 40;
pub const REG_GOAL_POSITION: u8 = 42;
pub const REG_PRESENT_POSITION: u8 = 56;

/// Raw position units, 4096 ticks per output revolution.
pub const TICKS_PER_REV: u16 = 4096;

pub fn checksum(body: &[u8]) -> u8 {
    let mut sum: u8 = 0;
    for &b in body {
        sum = sum.wrapping_add(b);
    }
    !sum
}

pub fn instruction_packet(id: u8, instr: u8, params: &[u8]) -> Vec<u8> {
    let len = (params.len() + 2) as u8;
    let mut packet = Vec::with_capacity(6 + params.len());
    packet.extend_from_slice(&HEADER);
    packet.push(id);
    packet.push(len);
    packet.push(instr);
    packet.extend_from_slice(params);
    packet.push(checksum(&packet[2..]));
    packet
}

pub fn ping(id: u8) -> Vec<u8> {
    instruction_packet(id, INSTR_PING, &[])
}

pub fn write_u8(id: u8, reg: u8, value: u8) -> Vec<u8> {
    instruction_packet(id, INSTR_WRITE, &[reg, value])
}

pub fn write_u16(id: u8, reg: u8, value: u16) -> Vec<u8> {
    let [lo, hi] = value.to_le_bytes();
    instruction_packet(id, INSTR_WRITE, &[reg, lo, hi])
}

pub fn read_request(id: u8, reg: u8, count: u8) -> Vec<u8> {
    instruction_packet(id, INSTR_READ, &[reg, count])
}

#[derive(Debug, PartialEq, Eq)]
pub struct StatusPacket {
    pub id: u8,
    pub error: u8,
    pub params: Vec<u8>,
}

/// Reads one status packet, resynchronizing on the 0xFF 0xFF marker so a
/// byte of line noise doesn't wedge the stream.
pub fn read_status(reader: &mut impl Read) -> io::Result<StatusPacket> {
    let mut window = [0u8; 2];
    reader.read_exact(&mut window)?;
    while window != HEADER {
        window[0] = window[1];
        reader.read_exact(&mut window[1..])?;
    }

    let mut head = [0u8; 3];
    reader.read_exact(&mut head)?;
    let [id, len, error] = head;
    if len < 2 {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "status length too short"));
    }
    let mut params = vec![0u8; usize::from(len) - 2];
    reader.read_exact(&mut params)?;
    let mut chk = [0u8; 1];
    reader.read_exact(&mut chk)?;

    let mut summed = vec![id, len, error];
    summed.extend_from_slice(&params);
    if checksum(&summed) != chk[0] {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "status checksum mismatch"));
    }
    Ok(StatusPacket { id, error, params })
}

pub fn read_present_position<P: Read + Write>(port: &mut P, id: u8) -> io::Result<u16> {
    port.write_all(&read_request(id, REG_PRESENT_POSITION, 2))?;
    port.flush()?;
    let status = read_status(port)?;
    if status.id != id {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("reply from servo {} while polling servo {id}", status.id),
        ));
    }
    if status.params.len() < 2 {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "short position reply"));
    }
    Ok(u16::from_le_bytes([status.params[0], status.params[1]]))
}
