//! Global Constants.
//!
//! This module defines constants shared by the translator, the trap controller and the
//! differential co-simulator. It includes:
//! 1. **Memory Constants:** Page size, shift and offset mask.
//! 2. **Sv32 Constants:** Virtual page number widths and page table entry size.
//! 3. **Boot Constants:** The reset vector the reference engine is bootstrapped at.
//! 4. **Instruction Constants:** Field positions used to assemble `csrrw`.

/// Page size in bytes (4KB).
pub const PAGE_SIZE: u64 = 4096;

/// Number of bits to shift to convert between bytes and pages.
pub const PAGE_SHIFT: u64 = 12;

/// Mask for extracting the page offset from an address.
pub const PAGE_OFFSET_MASK: u64 = PAGE_SIZE - 1;

/// Width of one Sv32 virtual page number field (VPN0 and VPN1).
pub const SV32_VPN_BITS: u64 = 10;

/// Mask for one Sv32 virtual page number field.
pub const SV32_VPN_MASK: u64 = (1 << SV32_VPN_BITS) - 1;

/// Size of a Sv32 page table entry in bytes.
pub const SV32_PTE_SIZE: u64 = 4;

/// Default physical address execution starts from, and where bootstrap programs are placed.
pub const RESET_VECTOR: u64 = 0x8000_0000;

/// Major opcode of the SYSTEM instruction group (`csrrw` and friends).
pub const OPCODE_SYSTEM: u32 = 0b111_0011;

/// `funct3` selecting `csrrw` within the SYSTEM group.
pub const FUNCT3_CSRRW: u32 = 0b001;

/// Bit position shift for the destination register (rd) field.
pub const RD_SHIFT: u32 = 7;

/// Bit position shift for the `funct3` field.
pub const FUNCT3_SHIFT: u32 = 12;

/// Bit position shift for the first source register (rs1) field.
pub const RS1_SHIFT: u32 = 15;

/// Bit position shift for the 12-bit CSR number field.
pub const CSR_SHIFT: u32 = 20;

/// Bit mask for a register index field.
pub const REG_FIELD_MASK: u32 = 0x1F;

/// Bit mask for the CSR number field.
pub const CSR_FIELD_MASK: u32 = 0xFFF;
