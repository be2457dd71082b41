use {
	crate::errors::PriceError,
	std::{fmt, str::FromStr},
};

/// chart 支持的时间范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
	OneDay,
	SevenDays,
	FourteenDays,
	OneMonth,
	OneYear,
}

impl Period {
	pub const ALL: [Period; 5] = [Period::OneDay, Period::SevenDays, Period::FourteenDays, Period::OneMonth, Period::OneYear];

	pub fn label(&self) -> &'static str {
		match self {
			Period::OneDay => "1D",
			Period::SevenDays => "7D",
			Period::FourteenDays => "14D",
			Period::OneMonth => "1M",
			Period::OneYear => "1Y",
		}
	}

	pub fn days(&self) -> u32 {
		match self {
			Period::OneDay => 1,
			Period::SevenDays => 7,
			Period::FourteenDays => 14,
			Period::OneMonth => 30,
			Period::OneYear => 365,
		}
	}
}

impl FromStr for Period {
	type Err = PriceError;

	// 标签大小写敏感 和上游约定一致
	fn from_str(label: &str) -> Result<Self, Self::Err> {
		Period::ALL.into_iter().find(|period| period.label() == label).ok_or_else(|| PriceError::UnsupportedPeriod(label.to_string()))
	}
}

impl fmt::Display for Period {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}
