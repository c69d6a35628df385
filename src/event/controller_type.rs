use serde::Serialize;

/// MIDI continuous controller numbers.
///
/// Numbers the MIDI 1.0 table leaves undefined still decode, as `Undefined`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ControllerType {
    /// Switches the patch bank, paired with a program change
    BankSelectMsb,
    /// Usually vibrato depth
    ModulationWheelMsb,
    BreathControllerMsb,
    FootControllerMsb,
    PortamentoTimeMsb,
    /// Value for the selected RPN or NRPN parameter
    DataEntryMsb,
    /// Channel volume
    VolumeMsb,
    /// Stereo balance, 64 is center
    BalanceMsb,
    /// Mono pan position, 64 is center
    PanMsb,
    /// Percentage of the channel volume
    ExpressionMsb,
    Effect1Msb,
    Effect2Msb,
    GeneralPurpose1Msb,
    GeneralPurpose2Msb,
    GeneralPurpose3Msb,
    GeneralPurpose4Msb,
    BankSelectLsb,
    ModulationLsb,
    BreathControllerLsb,
    FootControllerLsb,
    PortamentoTimeLsb,
    DataEntryLsb,
    VolumeLsb,
    BalanceLsb,
    PanLsb,
    ExpressionLsb,
    Effect1Lsb,
    Effect2Lsb,
    GeneralPurpose1Lsb,
    GeneralPurpose2Lsb,
    GeneralPurpose3Lsb,
    GeneralPurpose4Lsb,
    /// Sustain on at 64 and above
    SustainPedalSwitch,
    PortamentoSwitch,
    /// Holds only the notes already sounding when pressed
    SostenutoSwitch,
    SoftPedalSwitch,
    LegatoFootswitch,
    Hold2Switch,
    SoundController1,
    SoundController2,
    SoundController3,
    SoundController4,
    SoundController5,
    SoundController6,
    SoundController7,
    SoundController8,
    SoundController9,
    SoundController10,
    GeneralPurpose5,
    GeneralPurpose6,
    GeneralPurpose7,
    GeneralPurpose8,
    PortamentoAmount,
    /// Usually reverb send
    Effects1Depth,
    Effects2Depth,
    /// Usually chorus send
    Effects3Depth,
    Effects4Depth,
    Effects5Depth,
    DataIncrement,
    DataDecrement,
    /// Selects the NRPN parameter for data entry
    NrpnLsb,
    NrpnMsb,
    /// Selects the RPN parameter for data entry
    RpnLsb,
    RpnMsb,
    /// Channel mode messages start here
    AllSoundOff,
    ResetAllControllers,
    LocalOnOffSwitch,
    AllNotesOff,
    OmniModeOff,
    OmniModeOn,
    MonophonicMode,
    PolyphonicMode,
    Undefined(u8),
}

impl ControllerType {
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            0 => Self::BankSelectMsb,
            1 => Self::ModulationWheelMsb,
            2 => Self::BreathControllerMsb,
            4 => Self::FootControllerMsb,
            5 => Self::PortamentoTimeMsb,
            6 => Self::DataEntryMsb,
            7 => Self::VolumeMsb,
            8 => Self::BalanceMsb,
            10 => Self::PanMsb,
            11 => Self::ExpressionMsb,
            12 => Self::Effect1Msb,
            13 => Self::Effect2Msb,
            16 => Self::GeneralPurpose1Msb,
            17 => Self::GeneralPurpose2Msb,
            18 => Self::GeneralPurpose3Msb,
            19 => Self::GeneralPurpose4Msb,
            32 => Self::BankSelectLsb,
            33 => Self::ModulationLsb,
            34 => Self::BreathControllerLsb,
            36 => Self::FootControllerLsb,
            37 => Self::PortamentoTimeLsb,
            38 => Self::DataEntryLsb,
            39 => Self::VolumeLsb,
            40 => Self::BalanceLsb,
            42 => Self::PanLsb,
            43 => Self::ExpressionLsb,
            44 => Self::Effect1Lsb,
            45 => Self::Effect2Lsb,
            48 => Self::GeneralPurpose1Lsb,
            49 => Self::GeneralPurpose2Lsb,
            50 => Self::GeneralPurpose3Lsb,
            51 => Self::GeneralPurpose4Lsb,
            64 => Self::SustainPedalSwitch,
            65 => Self::PortamentoSwitch,
            66 => Self::SostenutoSwitch,
            67 => Self::SoftPedalSwitch,
            68 => Self::LegatoFootswitch,
            69 => Self::Hold2Switch,
            70 => Self::SoundController1,
            71 => Self::SoundController2,
            72 => Self::SoundController3,
            73 => Self::SoundController4,
            74 => Self::SoundController5,
            75 => Self::SoundController6,
            76 => Self::SoundController7,
            77 => Self::SoundController8,
            78 => Self::SoundController9,
            79 => Self::SoundController10,
            80 => Self::GeneralPurpose5,
            81 => Self::GeneralPurpose6,
            82 => Self::GeneralPurpose7,
            83 => Self::GeneralPurpose8,
            84 => Self::PortamentoAmount,
            91 => Self::Effects1Depth,
            92 => Self::Effects2Depth,
            93 => Self::Effects3Depth,
            94 => Self::Effects4Depth,
            95 => Self::Effects5Depth,
            96 => Self::DataIncrement,
            97 => Self::DataDecrement,
            98 => Self::NrpnLsb,
            99 => Self::NrpnMsb,
            100 => Self::RpnLsb,
            101 => Self::RpnMsb,
            120 => Self::AllSoundOff,
            121 => Self::ResetAllControllers,
            122 => Self::LocalOnOffSwitch,
            123 => Self::AllNotesOff,
            124 => Self::OmniModeOff,
            125 => Self::OmniModeOn,
            126 => Self::MonophonicMode,
            127 => Self::PolyphonicMode,
            other => Self::Undefined(other),
        }
    }

    /// Controller number as found in the event data byte
    pub const fn number(self) -> u8 {
        match self {
            Self::BankSelectMsb => 0,
            Self::ModulationWheelMsb => 1,
            Self::BreathControllerMsb => 2,
            Self::FootControllerMsb => 4,
            Self::PortamentoTimeMsb => 5,
            Self::DataEntryMsb => 6,
            Self::VolumeMsb => 7,
            Self::BalanceMsb => 8,
            Self::PanMsb => 10,
            Self::ExpressionMsb => 11,
            Self::Effect1Msb => 12,
            Self::Effect2Msb => 13,
            Self::GeneralPurpose1Msb => 16,
            Self::GeneralPurpose2Msb => 17,
            Self::GeneralPurpose3Msb => 18,
            Self::GeneralPurpose4Msb => 19,
            Self::BankSelectLsb => 32,
            Self::ModulationLsb => 33,
            Self::BreathControllerLsb => 34,
            Self::FootControllerLsb => 36,
            Self::PortamentoTimeLsb => 37,
            Self::DataEntryLsb => 38,
            Self::VolumeLsb => 39,
            Self::BalanceLsb => 40,
            Self::PanLsb => 42,
            Self::ExpressionLsb => 43,
            Self::Effect1Lsb => 44,
            Self::Effect2Lsb => 45,
            Self::GeneralPurpose1Lsb => 48,
            Self::GeneralPurpose2Lsb => 49,
            Self::GeneralPurpose3Lsb => 50,
            Self::GeneralPurpose4Lsb => 51,
            Self::SustainPedalSwitch => 64,
            Self::PortamentoSwitch => 65,
            Self::SostenutoSwitch => 66,
            Self::SoftPedalSwitch => 67,
            Self::LegatoFootswitch => 68,
            Self::Hold2Switch => 69,
            Self::SoundController1 => 70,
            Self::SoundController2 => 71,
            Self::SoundController3 => 72,
            Self::SoundController4 => 73,
            Self::SoundController5 => 74,
            Self::SoundController6 => 75,
            Self::SoundController7 => 76,
            Self::SoundController8 => 77,
            Self::SoundController9 => 78,
            Self::SoundController10 => 79,
            Self::GeneralPurpose5 => 80,
            Self::GeneralPurpose6 => 81,
            Self::GeneralPurpose7 => 82,
            Self::GeneralPurpose8 => 83,
            Self::PortamentoAmount => 84,
            Self::Effects1Depth => 91,
            Self::Effects2Depth => 92,
            Self::Effects3Depth => 93,
            Self::Effects4Depth => 94,
            Self::Effects5Depth => 95,
            Self::DataIncrement => 96,
            Self::DataDecrement => 97,
            Self::NrpnLsb => 98,
            Self::NrpnMsb => 99,
            Self::RpnLsb => 100,
            Self::RpnMsb => 101,
            Self::AllSoundOff => 120,
            Self::ResetAllControllers => 121,
            Self::LocalOnOffSwitch => 122,
            Self::AllNotesOff => 123,
            Self::OmniModeOff => 124,
            Self::OmniModeOn => 125,
            Self::MonophonicMode => 126,
            Self::PolyphonicMode => 127,
            Self::Undefined(number) => number,
        }
    }
}
