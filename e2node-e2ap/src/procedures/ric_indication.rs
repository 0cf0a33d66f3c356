//! RIC Indication
//!
//! Carries the service-model header and message produced by a REPORT or
//! INSERT action back to the RIC. Class 2 procedure; no response.

use crate::codec::{find_ie, mandatory_ie, IeContainer, ProtocolIe, Result};
use crate::ids::*;
use crate::ies::{Criticality, RicIndicationType, RicRequestId};

use super::{decode_octets, decode_ran_function_id, octets_ie, ran_function_id_ie};

#[derive(Debug, Clone, PartialEq)]
pub struct RicIndication {
    pub request_id: RicRequestId,
    pub ran_function_id: u16,
    pub action_id: u8,
    pub sn: Option<u16>,
    pub indication_type: RicIndicationType,
    pub header: Vec<u8>,
    pub message: Vec<u8>,
    pub call_process_id: Option<Vec<u8>>,
}

impl IeContainer for RicIndication {
    fn encode_ies(&self) -> Result<Vec<ProtocolIe>> {
        let mut ies = vec![
            ProtocolIe::new(ID_RIC_REQUEST_ID, Criticality::Reject, &self.request_id)?,
            ran_function_id_ie(self.ran_function_id)?,
            ProtocolIe::build(ID_RIC_ACTION_ID, Criticality::Reject, |enc| {
                enc.put_constrained(u64::from(self.action_id), 0, 255)
            })?,
        ];
        if let Some(sn) = self.sn {
            ies.push(ProtocolIe::build(
                ID_RIC_INDICATION_SN,
                Criticality::Reject,
                |enc| enc.put_constrained(u64::from(sn), 0, 65535),
            )?);
        }
        ies.push(ProtocolIe::new(
            ID_RIC_INDICATION_TYPE,
            Criticality::Reject,
            &self.indication_type,
        )?);
        ies.push(octets_ie(
            ID_RIC_INDICATION_HEADER,
            Criticality::Reject,
            &self.header,
        )?);
        ies.push(octets_ie(
            ID_RIC_INDICATION_MESSAGE,
            Criticality::Reject,
            &self.message,
        )?);
        if let Some(call_process_id) = &self.call_process_id {
            ies.push(octets_ie(
                ID_RIC_CALL_PROCESS_ID,
                Criticality::Reject,
                call_process_id,
            )?);
        }
        Ok(ies)
    }

    fn decode_ies(ies: &[ProtocolIe]) -> Result<Self> {
        let sn = match find_ie(ies, ID_RIC_INDICATION_SN) {
            Some(ie) => Some(ie.parse(|dec| Ok(dec.get_constrained(0, 65535)? as u16))?),
            None => None,
        };
        let call_process_id = match find_ie(ies, ID_RIC_CALL_PROCESS_ID) {
            Some(ie) => Some(decode_octets(ie)?),
            None => None,
        };

        Ok(Self {
            request_id: mandatory_ie(ies, ID_RIC_REQUEST_ID, "RICrequestID")?.decode_value()?,
            ran_function_id: decode_ran_function_id(mandatory_ie(
                ies,
                ID_RAN_FUNCTION_ID,
                "RANfunctionID",
            )?)?,
            action_id: mandatory_ie(ies, ID_RIC_ACTION_ID, "RICactionID")?
                .parse(|dec| Ok(dec.get_constrained(0, 255)? as u8))?,
            sn,
            indication_type: mandatory_ie(ies, ID_RIC_INDICATION_TYPE, "RICindicationType")?
                .decode_value()?,
            header: decode_octets(mandatory_ie(
                ies,
                ID_RIC_INDICATION_HEADER,
                "RICindicationHeader",
            )?)?,
            message: decode_octets(mandatory_ie(
                ies,
                ID_RIC_INDICATION_MESSAGE,
                "RICindicationMessage",
            )?)?,
            call_process_id,
        })
    }
}
