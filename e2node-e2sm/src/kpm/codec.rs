//! E2SM-KPM payload encoding (aligned PER)
//!
//! Covers the subset of E2SM-KPM used by the KPM monitor: the RAN function
//! description, event trigger format 1, action definition format 1 and the
//! format 1 indication header and message.

use e2node_common::Plmn;
use e2node_e2ap::ies::AperCodec;
use e2node_e2ap::per::{PerDecoder, PerEncoder, PerError, Result, SizeRange};

const NAME_SIZE: SizeRange = SizeRange::extensible(1, 150);
const OID_SIZE: SizeRange = SizeRange::extensible(1, 1000);
const STYLE_LIST_SIZE: SizeRange = SizeRange::new(1, 63);
const MEAS_INFO_LIST_SIZE: SizeRange = SizeRange::new(1, 65535);
const MEAS_DATA_LIST_SIZE: SizeRange = SizeRange::new(1, 65535);
const LABEL_INFO_LIST_SIZE: SizeRange = SizeRange::new(1, 2_147_483_647);
const MEAS_RECORD_LIST_SIZE: SizeRange = SizeRange::new(1, 2_147_483_647);
const MAX_PERIOD: u64 = 4_294_967_295;

/// Number of optional fields in MeasurementLabel
const MEAS_LABEL_FIELDS: usize = 21;

pub fn encode<T: AperCodec>(value: &T) -> Result<Vec<u8>> {
    let mut enc = PerEncoder::new();
    value.aper_encode(&mut enc)?;
    Ok(enc.finish())
}

pub fn decode<T: AperCodec>(bytes: &[u8]) -> Result<T> {
    T::aper_decode(&mut PerDecoder::new(bytes))
}

/// Encodes ENUMERATED { true, ... }
fn put_true(enc: &mut PerEncoder) -> Result<()> {
    enc.put_enumerated(0, 1, true)
}

fn encode_list<T: AperCodec>(enc: &mut PerEncoder, items: &[T], size: SizeRange) -> Result<()> {
    enc.put_constrained_length(items.len(), size)?;
    items.iter().try_for_each(|item| item.aper_encode(enc))
}

fn decode_list<T: AperCodec>(dec: &mut PerDecoder<'_>, size: SizeRange) -> Result<Vec<T>> {
    let count = dec.get_constrained_length(size)?;
    (0..count).map(|_| T::aper_decode(dec)).collect()
}

// ============================================================================
// RAN function description
// ============================================================================

/// RANfunction-Name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RanFunctionName {
    pub short_name: String,
    pub oid: String,
    pub description: String,
    pub instance: Option<i64>,
}

impl AperCodec for RanFunctionName {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_sequence_preamble(true, &[self.instance.is_some()]);
        enc.put_printable_string(&self.short_name, NAME_SIZE)?;
        enc.put_printable_string(&self.oid, OID_SIZE)?;
        enc.put_printable_string(&self.description, NAME_SIZE)?;
        if let Some(instance) = self.instance {
            enc.put_unconstrained_integer(instance)?;
        }
        Ok(())
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        let present = dec.get_sequence_preamble(true, 1)?;
        Ok(Self {
            short_name: dec.get_printable_string(NAME_SIZE)?,
            oid: dec.get_printable_string(OID_SIZE)?,
            description: dec.get_printable_string(NAME_SIZE)?,
            instance: if present[0] {
                Some(dec.get_unconstrained_integer()?)
            } else {
                None
            },
        })
    }
}

/// RIC-EventTriggerStyle-Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTriggerStyleItem {
    pub style_type: i64,
    pub name: String,
    pub format_type: i64,
}

impl AperCodec for EventTriggerStyleItem {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_sequence_preamble(true, &[]);
        enc.put_unconstrained_integer(self.style_type)?;
        enc.put_printable_string(&self.name, NAME_SIZE)?;
        enc.put_unconstrained_integer(self.format_type)
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        dec.get_sequence_preamble(true, 0)?;
        Ok(Self {
            style_type: dec.get_unconstrained_integer()?,
            name: dec.get_printable_string(NAME_SIZE)?,
            format_type: dec.get_unconstrained_integer()?,
        })
    }
}

/// MeasurementInfo-Action-Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementInfoActionItem {
    pub name: String,
    pub id: Option<u32>,
}

impl AperCodec for MeasurementInfoActionItem {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_sequence_preamble(true, &[self.id.is_some()]);
        enc.put_printable_string(&self.name, NAME_SIZE)?;
        if let Some(id) = self.id {
            enc.put_extensible_constrained(u64::from(id), 1, 65536)?;
        }
        Ok(())
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        let present = dec.get_sequence_preamble(true, 1)?;
        Ok(Self {
            name: dec.get_printable_string(NAME_SIZE)?,
            id: if present[0] {
                Some(dec.get_extensible_constrained(1, 65536)? as u32)
            } else {
                None
            },
        })
    }
}

/// RIC-ReportStyle-Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportStyleItem {
    pub style_type: i64,
    pub name: String,
    pub action_format_type: i64,
    pub measurements: Vec<MeasurementInfoActionItem>,
    pub header_format_type: i64,
    pub message_format_type: i64,
}

impl AperCodec for ReportStyleItem {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_sequence_preamble(true, &[]);
        enc.put_unconstrained_integer(self.style_type)?;
        enc.put_printable_string(&self.name, NAME_SIZE)?;
        enc.put_unconstrained_integer(self.action_format_type)?;
        encode_list(enc, &self.measurements, MEAS_INFO_LIST_SIZE)?;
        enc.put_unconstrained_integer(self.header_format_type)?;
        enc.put_unconstrained_integer(self.message_format_type)
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        dec.get_sequence_preamble(true, 0)?;
        Ok(Self {
            style_type: dec.get_unconstrained_integer()?,
            name: dec.get_printable_string(NAME_SIZE)?,
            action_format_type: dec.get_unconstrained_integer()?,
            measurements: decode_list(dec, MEAS_INFO_LIST_SIZE)?,
            header_format_type: dec.get_unconstrained_integer()?,
            message_format_type: dec.get_unconstrained_integer()?,
        })
    }
}

/// E2SM-KPM-RANfunction-Description
///
/// Empty style lists are left out of the encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RanFunctionDescription {
    pub name: RanFunctionName,
    pub event_trigger_styles: Vec<EventTriggerStyleItem>,
    pub report_styles: Vec<ReportStyleItem>,
}

impl AperCodec for RanFunctionDescription {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_sequence_preamble(
            true,
            &[
                !self.event_trigger_styles.is_empty(),
                !self.report_styles.is_empty(),
            ],
        );
        self.name.aper_encode(enc)?;
        if !self.event_trigger_styles.is_empty() {
            encode_list(enc, &self.event_trigger_styles, STYLE_LIST_SIZE)?;
        }
        if !self.report_styles.is_empty() {
            encode_list(enc, &self.report_styles, STYLE_LIST_SIZE)?;
        }
        Ok(())
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        let present = dec.get_sequence_preamble(true, 2)?;
        let name = RanFunctionName::aper_decode(dec)?;
        let event_trigger_styles = if present[0] {
            decode_list(dec, STYLE_LIST_SIZE)?
        } else {
            Vec::new()
        };
        let report_styles = if present[1] {
            decode_list(dec, STYLE_LIST_SIZE)?
        } else {
            Vec::new()
        };
        Ok(Self {
            name,
            event_trigger_styles,
            report_styles,
        })
    }
}

// ============================================================================
// Event trigger
// ============================================================================

/// E2SM-KPM-EventTriggerDefinition with format 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTriggerDefinition {
    pub report_period_ms: u32,
}

impl AperCodec for EventTriggerDefinition {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_sequence_preamble(true, &[]);
        enc.put_choice_index(0, 1, true)?;
        enc.put_sequence_preamble(true, &[]);
        enc.put_constrained(u64::from(self.report_period_ms), 1, MAX_PERIOD)
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        dec.get_sequence_preamble(true, 0)?;
        dec.get_choice_index(1, true)?;
        dec.get_sequence_preamble(true, 0)?;
        Ok(Self {
            report_period_ms: dec.get_constrained(1, MAX_PERIOD)? as u32,
        })
    }
}

// ============================================================================
// Measurement information
// ============================================================================

/// MeasurementType ::= CHOICE { measName, measID, ... }
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeasurementType {
    Name(String),
    Id(u32),
}

impl AperCodec for MeasurementType {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        match self {
            MeasurementType::Name(name) => {
                enc.put_choice_index(0, 2, true)?;
                enc.put_printable_string(name, NAME_SIZE)
            }
            MeasurementType::Id(id) => {
                enc.put_choice_index(1, 2, true)?;
                enc.put_extensible_constrained(u64::from(*id), 1, 65536)
            }
        }
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        match dec.get_choice_index(2, true)? {
            0 => Ok(MeasurementType::Name(dec.get_printable_string(NAME_SIZE)?)),
            _ => Ok(MeasurementType::Id(
                dec.get_extensible_constrained(1, 65536)? as u32,
            )),
        }
    }
}

/// Label kinds reported by this node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKind {
    NoLabel,
    Sum,
    Min,
    Max,
    Avg,
}

impl LabelKind {
    const ALL: [LabelKind; 5] = [
        LabelKind::NoLabel,
        LabelKind::Sum,
        LabelKind::Min,
        LabelKind::Max,
        LabelKind::Avg,
    ];

    /// Position of the presence bit within MeasurementLabel
    fn field_index(self) -> usize {
        match self {
            LabelKind::NoLabel => 0,
            LabelKind::Sum => 12,
            LabelKind::Min => 18,
            LabelKind::Max => 19,
            LabelKind::Avg => 20,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LabelKind::NoLabel => "no_label",
            LabelKind::Sum => "sum",
            LabelKind::Min => "min",
            LabelKind::Max => "max",
            LabelKind::Avg => "avg",
        }
    }
}

/// MeasurementLabel restricted to the flag-style labels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasurementLabel {
    pub kinds: Vec<LabelKind>,
}

impl MeasurementLabel {
    pub fn new(kind: LabelKind) -> Self {
        Self { kinds: vec![kind] }
    }
}

impl AperCodec for MeasurementLabel {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        // LabelInfoItem wrapper
        enc.put_sequence_preamble(true, &[]);

        let mut present = [false; MEAS_LABEL_FIELDS];
        for kind in &self.kinds {
            present[kind.field_index()] = true;
        }
        enc.put_sequence_preamble(true, &present);
        for kind in LabelKind::ALL {
            if present[kind.field_index()] {
                put_true(enc)?;
            }
        }
        Ok(())
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        dec.get_sequence_preamble(true, 0)?;
        let present = dec.get_sequence_preamble(true, MEAS_LABEL_FIELDS)?;

        let mut kinds = Vec::new();
        for (index, set) in present.iter().enumerate() {
            if !*set {
                continue;
            }
            match LabelKind::ALL.iter().find(|k| k.field_index() == index) {
                Some(kind) => kinds.push(*kind),
                None => return Err(PerError::Unsupported("measLabel")),
            }
        }
        // Values follow in field order, which matches ALL
        for _ in &kinds {
            dec.get_enumerated(1, true)?;
        }
        Ok(Self { kinds })
    }
}

/// MeasurementInfoItem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementInfoItem {
    pub measurement: MeasurementType,
    pub labels: Vec<MeasurementLabel>,
}

impl AperCodec for MeasurementInfoItem {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_sequence_preamble(true, &[]);
        self.measurement.aper_encode(enc)?;
        encode_list(enc, &self.labels, LABEL_INFO_LIST_SIZE)
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        dec.get_sequence_preamble(true, 0)?;
        Ok(Self {
            measurement: MeasurementType::aper_decode(dec)?,
            labels: decode_list(dec, LABEL_INFO_LIST_SIZE)?,
        })
    }
}

/// CGI ::= CHOICE { nR-CGI, eUTRA-CGI, ... }
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellGlobalId {
    Nr { plmn: Plmn, cell_id: u64 },
    Eutra { plmn: Plmn, cell_id: u32 },
}

impl AperCodec for CellGlobalId {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        match self {
            CellGlobalId::Nr { plmn, cell_id } => {
                enc.put_choice_index(0, 2, true)?;
                enc.put_sequence_preamble(true, &[]);
                plmn.aper_encode(enc)?;
                enc.put_fixed_bit_string(*cell_id, 36);
            }
            CellGlobalId::Eutra { plmn, cell_id } => {
                enc.put_choice_index(1, 2, true)?;
                enc.put_sequence_preamble(true, &[]);
                plmn.aper_encode(enc)?;
                enc.put_fixed_bit_string(u64::from(*cell_id), 28);
            }
        }
        Ok(())
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        let index = dec.get_choice_index(2, true)?;
        dec.get_sequence_preamble(true, 0)?;
        let plmn = Plmn::aper_decode(dec)?;
        Ok(match index {
            0 => CellGlobalId::Nr {
                plmn,
                cell_id: dec.get_fixed_bit_string(36)?,
            },
            _ => CellGlobalId::Eutra {
                plmn,
                cell_id: dec.get_fixed_bit_string(28)? as u32,
            },
        })
    }
}

// ============================================================================
// Action definition
// ============================================================================

/// E2SM-KPM-ActionDefinition-Format1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDefinitionFormat1 {
    pub measurements: Vec<MeasurementInfoItem>,
    pub granularity_period_ms: u32,
    pub cell_global_id: Option<CellGlobalId>,
}

impl AperCodec for ActionDefinitionFormat1 {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_sequence_preamble(true, &[self.cell_global_id.is_some()]);
        encode_list(enc, &self.measurements, MEAS_INFO_LIST_SIZE)?;
        enc.put_constrained(u64::from(self.granularity_period_ms), 1, MAX_PERIOD)?;
        if let Some(cgi) = &self.cell_global_id {
            cgi.aper_encode(enc)?;
        }
        Ok(())
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        let present = dec.get_sequence_preamble(true, 1)?;
        let measurements = decode_list(dec, MEAS_INFO_LIST_SIZE)?;
        let granularity_period_ms = dec.get_constrained(1, MAX_PERIOD)? as u32;
        let cell_global_id = if present[0] {
            Some(CellGlobalId::aper_decode(dec)?)
        } else {
            None
        };
        Ok(Self {
            measurements,
            granularity_period_ms,
            cell_global_id,
        })
    }
}

/// E2SM-KPM-ActionDefinition; only format 1 is understood
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDefinition {
    pub style_type: i64,
    pub format1: ActionDefinitionFormat1,
}

impl AperCodec for ActionDefinition {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_sequence_preamble(true, &[]);
        enc.put_unconstrained_integer(self.style_type)?;
        enc.put_choice_index(0, 5, true)?;
        self.format1.aper_encode(enc)
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        dec.get_sequence_preamble(true, 0)?;
        let style_type = dec.get_unconstrained_integer()?;
        match dec.get_choice_index(5, true)? {
            0 => Ok(Self {
                style_type,
                format1: ActionDefinitionFormat1::aper_decode(dec)?,
            }),
            index => Err(PerError::InvalidChoice {
                type_name: "actionDefinition-formats",
                index,
            }),
        }
    }
}

// ============================================================================
// Indication header and message
// ============================================================================

/// E2SM-KPM-IndicationHeader with format 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicationHeader {
    /// Seconds since the Unix epoch
    pub collection_start_time: u32,
}

impl AperCodec for IndicationHeader {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_sequence_preamble(true, &[]);
        enc.put_choice_index(0, 1, true)?;
        // fileFormatversion, senderName, senderType, vendorName
        enc.put_sequence_preamble(true, &[false, false, false, false]);
        enc.put_fixed_octets(&self.collection_start_time.to_be_bytes());
        Ok(())
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        dec.get_sequence_preamble(true, 0)?;
        dec.get_choice_index(1, true)?;
        let present = dec.get_sequence_preamble(true, 4)?;
        let bytes = dec.get_fixed_octets(4)?;
        if present.iter().any(|p| *p) {
            return Err(PerError::Unsupported("indicationHeader-Format1 optional fields"));
        }
        Ok(Self {
            collection_start_time: u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        })
    }
}

/// MeasurementRecordItem ::= CHOICE { integer, real, noValue, ... }
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementRecord {
    Integer(u32),
    NoValue,
}

impl AperCodec for MeasurementRecord {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        match self {
            MeasurementRecord::Integer(value) => {
                enc.put_choice_index(0, 3, true)?;
                enc.put_constrained(u64::from(*value), 0, MAX_PERIOD)
            }
            MeasurementRecord::NoValue => enc.put_choice_index(2, 3, true),
        }
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        match dec.get_choice_index(3, true)? {
            0 => Ok(MeasurementRecord::Integer(
                dec.get_constrained(0, MAX_PERIOD)? as u32,
            )),
            2 => Ok(MeasurementRecord::NoValue),
            _ => Err(PerError::Unsupported("MeasurementRecordItem real")),
        }
    }
}

/// MeasurementDataItem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementDataItem {
    pub records: Vec<MeasurementRecord>,
}

impl AperCodec for MeasurementDataItem {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_sequence_preamble(true, &[false]);
        encode_list(enc, &self.records, MEAS_RECORD_LIST_SIZE)
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        let present = dec.get_sequence_preamble(true, 1)?;
        let records = decode_list(dec, MEAS_RECORD_LIST_SIZE)?;
        if present[0] {
            // incompleteFlag ENUMERATED { true, ... }
            dec.get_enumerated(1, true)?;
        }
        Ok(Self { records })
    }
}

/// E2SM-KPM-IndicationMessage with format 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicationMessage {
    pub data: Vec<MeasurementDataItem>,
    pub info: Vec<MeasurementInfoItem>,
    pub granularity_period_ms: Option<u32>,
}

impl AperCodec for IndicationMessage {
    fn aper_encode(&self, enc: &mut PerEncoder) -> Result<()> {
        enc.put_sequence_preamble(true, &[]);
        enc.put_choice_index(0, 3, true)?;
        enc.put_sequence_preamble(
            true,
            &[!self.info.is_empty(), self.granularity_period_ms.is_some()],
        );
        encode_list(enc, &self.data, MEAS_DATA_LIST_SIZE)?;
        if !self.info.is_empty() {
            encode_list(enc, &self.info, MEAS_INFO_LIST_SIZE)?;
        }
        if let Some(period) = self.granularity_period_ms {
            enc.put_constrained(u64::from(period), 1, MAX_PERIOD)?;
        }
        Ok(())
    }

    fn aper_decode(dec: &mut PerDecoder<'_>) -> Result<Self> {
        dec.get_sequence_preamble(true, 0)?;
        let index = dec.get_choice_index(3, true)?;
        if index != 0 {
            return Err(PerError::InvalidChoice {
                type_name: "indicationMessage-formats",
                index,
            });
        }
        let present = dec.get_sequence_preamble(true, 2)?;
        let data = decode_list(dec, MEAS_DATA_LIST_SIZE)?;
        let info = if present[0] {
            decode_list(dec, MEAS_INFO_LIST_SIZE)?
        } else {
            Vec::new()
        };
        let granularity_period_ms = if present[1] {
            Some(dec.get_constrained(1, MAX_PERIOD)? as u32)
        } else {
            None
        };
        Ok(Self {
            data,
            info,
            granularity_period_ms,
        })
    }
}
