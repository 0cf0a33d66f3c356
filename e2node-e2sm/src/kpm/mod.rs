//! E2SM-KPM service model
//!
//! The KPM monitor advertises one periodic event trigger style, admits
//! REPORT style 1 actions over the supported measurements and fills each
//! indication with records from a [`MeasurementSource`].

pub mod codec;
pub mod measurements;

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use e2node_e2ap::ies::RicActionToBeSetupItem;
use tracing::{debug, info};

use crate::error::ServiceModelError;
use crate::model::{EventTrigger, IndicationContent, ServiceModel};

use codec::{
    ActionDefinition, ActionDefinitionFormat1, EventTriggerDefinition, EventTriggerStyleItem,
    IndicationHeader, IndicationMessage, MeasurementDataItem, MeasurementInfoActionItem,
    MeasurementInfoItem, MeasurementRecord, MeasurementType, RanFunctionDescription,
    RanFunctionName, ReportStyleItem,
};
pub use measurements::{
    is_supported_measurement, MeasurementSource, RandomMeasurementSource, SUPPORTED_MEASUREMENTS,
};

pub const KPM_SHORT_NAME: &str = "ORAN-E2SM-KPM";
pub const KPM_OID: &str = "1.3.6.1.4.1.53148.1.2.2.2";
pub const KPM_DESCRIPTION: &str = "KPM Monitor";
pub const KPM_REVISION: u16 = 0;

/// REPORT style "E2 Node Measurement"
const REPORT_STYLE_NODE_MEASUREMENT: i64 = 1;

/// KPM service model state
pub struct KpmServiceModel {
    instance: Option<i64>,
    actions: HashMap<u32, ActionDefinitionFormat1>,
    next_local_action_id: u32,
    source: Box<dyn MeasurementSource>,
}

impl KpmServiceModel {
    /// Creates the model with the default random measurement source.
    pub fn new() -> Self {
        Self::with_source(Box::new(RandomMeasurementSource::new()))
    }

    pub fn with_source(source: Box<dyn MeasurementSource>) -> Self {
        Self {
            instance: None,
            actions: HashMap::new(),
            next_local_action_id: 0,
            source,
        }
    }

    /// Sets the RAN function instance advertised in the function name.
    pub fn with_instance(mut self, instance: i64) -> Self {
        self.instance = Some(instance);
        self
    }

    /// Number of admitted actions currently registered
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    fn validate_format1(format: &ActionDefinitionFormat1) -> Result<(), ServiceModelError> {
        if format.granularity_period_ms == 0 {
            return Err(ServiceModelError::InvalidGranularityPeriod(0));
        }
        for item in &format.measurements {
            match &item.measurement {
                MeasurementType::Name(name) if is_supported_measurement(name) => {
                    debug!("Measurement {} with {} label(s)", name, item.labels.len());
                }
                MeasurementType::Name(name) => {
                    return Err(ServiceModelError::UnsupportedMeasurement(name.clone()))
                }
                MeasurementType::Id(id) => {
                    return Err(ServiceModelError::UnsupportedMeasurement(format!("measID {}", id)))
                }
            }
        }
        Ok(())
    }

    fn build_indication_message(&mut self, format: &ActionDefinitionFormat1) -> IndicationMessage {
        let mut data = Vec::with_capacity(format.measurements.len());
        let mut info = Vec::with_capacity(format.measurements.len());

        for item in &format.measurements {
            let name = match &item.measurement {
                MeasurementType::Name(name) => name.as_str(),
                MeasurementType::Id(_) => continue,
            };

            let mut records = Vec::new();
            for label in &item.labels {
                for kind in &label.kinds {
                    records.extend(self.source.collect(name, *kind));
                }
            }
            if records.is_empty() {
                records.push(MeasurementRecord::NoValue);
            }

            info.push(MeasurementInfoItem {
                measurement: item.measurement.clone(),
                labels: item.labels.clone(),
            });
            data.push(MeasurementDataItem { records });
        }

        IndicationMessage {
            data,
            info,
            // Some RICs cannot handle the optional granularity period
            granularity_period_ms: None,
        }
    }
}

impl Default for KpmServiceModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceModel for KpmServiceModel {
    fn short_name(&self) -> &str {
        KPM_SHORT_NAME
    }

    fn oid(&self) -> &str {
        KPM_OID
    }

    fn description(&self) -> &str {
        KPM_DESCRIPTION
    }

    fn revision(&self) -> u16 {
        KPM_REVISION
    }

    fn generate_ran_function_description(&self) -> Result<Vec<u8>, ServiceModelError> {
        let description = RanFunctionDescription {
            name: RanFunctionName {
                short_name: KPM_SHORT_NAME.to_string(),
                oid: KPM_OID.to_string(),
                description: KPM_DESCRIPTION.to_string(),
                instance: self.instance,
            },
            event_trigger_styles: vec![EventTriggerStyleItem {
                style_type: 1,
                name: "Periodic report".to_string(),
                format_type: 1,
            }],
            report_styles: vec![ReportStyleItem {
                style_type: REPORT_STYLE_NODE_MEASUREMENT,
                name: "E2 Node Measurement".to_string(),
                action_format_type: 1,
                measurements: SUPPORTED_MEASUREMENTS
                    .iter()
                    .map(|name| MeasurementInfoActionItem {
                        name: name.to_string(),
                        id: None,
                    })
                    .collect(),
                header_format_type: 1,
                message_format_type: 1,
            }],
        };
        info!("Generating RAN function description");
        Ok(codec::encode(&description)?)
    }

    fn process_event_trigger_definition(
        &self,
        definition: &[u8],
    ) -> Result<EventTrigger, ServiceModelError> {
        let trigger: EventTriggerDefinition = codec::decode(definition)?;
        Ok(EventTrigger::PeriodicReport {
            period_ms: trigger.report_period_ms,
        })
    }

    fn process_action_definition(
        &mut self,
        action: &RicActionToBeSetupItem,
    ) -> Result<u32, ServiceModelError> {
        let definition: ActionDefinition = codec::decode(&action.definition)?;
        if definition.style_type != REPORT_STYLE_NODE_MEASUREMENT {
            info!(
                "Unknown RIC style type {}, action {} not admitted",
                definition.style_type, action.action_id
            );
            return Err(ServiceModelError::UnsupportedStyle(definition.style_type));
        }
        Self::validate_format1(&definition.format1)?;

        let local_id = self.next_local_action_id;
        self.next_local_action_id = self.next_local_action_id.wrapping_add(1);
        self.actions.insert(local_id, definition.format1);
        debug!("Admitted action {} as local action {}", action.action_id, local_id);
        Ok(local_id)
    }

    fn remove_action_definition(&mut self, local_action_id: u32) -> bool {
        self.actions.remove(&local_action_id).is_some()
    }

    fn generate_indication_content(
        &mut self,
        local_action_id: u32,
    ) -> Result<IndicationContent, ServiceModelError> {
        let format = self
            .actions
            .get(&local_action_id)
            .cloned()
            .ok_or(ServiceModelError::UnknownAction(local_action_id))?;

        let collection_start_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(0);
        let header = codec::encode(&IndicationHeader {
            collection_start_time,
        })?;
        let message = codec::encode(&self.build_indication_message(&format))?;

        Ok(IndicationContent { header, message })
    }
}
